use serde_json::Value;

/// # Summary
/// 将 Webhook 请求体转换为流水线输入文本。
///
/// # Logic
/// 1. 请求体是 JSON 对象：展平为 `键: 值` 行。
/// 2. 请求体是 JSON 字符串：取其内容。
/// 3. 其余情况 (纯文本、数组、数字等)：原样使用。
pub fn body_to_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            let mut lines = Vec::new();
            flatten_object(&map, &mut lines);
            lines.join("\n")
        }
        Ok(Value::String(text)) => text,
        _ => body.to_string(),
    }
}

/// # Summary
/// 递归展平 JSON 对象。
///
/// # Invariants
/// - 保留字段在请求体中的顺序。
/// - 嵌套对象的字段以自身键名输出，不加父级前缀 (标签词识别依赖原始键名)。
/// - `null` 与空数组被跳过。
fn flatten_object(map: &serde_json::Map<String, Value>, lines: &mut Vec<String>) {
    for (key, value) in map {
        match value {
            Value::Object(inner) => flatten_object(inner, lines),
            Value::Null => {}
            Value::Array(items) => {
                let joined: Vec<String> = items.iter().filter_map(scalar).collect();
                if !joined.is_empty() {
                    lines.push(format!("{}: {}", key, joined.join(", ")));
                }
            }
            other => {
                if let Some(text) = scalar(other) {
                    lines.push(format!("{}: {}", key, text));
                }
            }
        }
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        // 数组中的复合值保持紧凑 JSON
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(body_to_text("标的: 000001\n信号: 多"), "标的: 000001\n信号: 多");
        assert_eq!(body_to_text("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn test_json_string_unwrapped() {
        assert_eq!(body_to_text(r#""标的: 000001""#), "标的: 000001");
    }

    #[test]
    fn test_object_flattened_in_order() {
        let body = r#"{"标的": "000001", "周期": 5, "信号": "多信号", "extra": null}"#;
        assert_eq!(body_to_text(body), "标的: 000001\n周期: 5\n信号: 多信号");
    }

    #[test]
    fn test_nested_and_arrays() {
        let body = r#"{"alert": {"symbol": "CL1!", "price": 78.5}, "指标": ["MACD", "RSI"], "tags": []}"#;
        assert_eq!(body_to_text(body), "symbol: CL1!\nprice: 78.5\n指标: MACD, RSI");
    }
}
