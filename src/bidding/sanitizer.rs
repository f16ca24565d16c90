// src/bidding/sanitizer.rs

use serde_json::Value;

/// 递归清洗请求中的所有字符串叶子节点，防止 HTML / 脚本注入。
/// 数字、布尔、null 原样保留，对象的 key 不做处理。
pub fn sanitize(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| (key, sanitize(v)))
                .collect(),
        ),
        other => other,
    }
}

/// 转义 & < > " '
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_nested_string_leaves_only() {
        let raw = json!({
            "id": "<script>alert('x')</script>",
            "imp": [{"id": "a&b", "bidfloor": 1.5, "banner": {"w": 320, "h": 50}}],
            "device": {"os": "android", "geo": {"country": "\"US\""}},
            "test": true,
            "ext": null
        });

        let clean = sanitize(raw);
        assert_eq!(clean["id"], json!("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert_eq!(clean["imp"][0]["id"], json!("a&amp;b"));
        assert_eq!(clean["device"]["geo"]["country"], json!("&quot;US&quot;"));
        // 数值类型不变
        assert!(clean["imp"][0]["bidfloor"].is_f64());
        assert!(clean["imp"][0]["banner"]["w"].is_u64());
        assert_eq!(clean["test"], json!(true));
        assert_eq!(clean["ext"], Value::Null);
    }

    #[test]
    fn plain_strings_are_untouched() {
        assert_eq!(escape_html("United States"), "United States");
        assert_eq!(sanitize(json!(["ios", 3])), json!(["ios", 3]));
    }
}
