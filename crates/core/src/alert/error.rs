use thiserror::Error;

/// # Summary
/// 告警流水线构建期错误。
///
/// # Invariants
/// - 仅在构建规则集时产生；`process` 运行期永不返回错误。
#[derive(Error, Debug)]
pub enum AlertError {
    // 规则正则编译失败
    #[error("Invalid pattern for rule `{rule}`: {reason}")]
    Pattern { rule: &'static str, reason: String },
}
