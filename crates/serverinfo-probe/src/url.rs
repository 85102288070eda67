//! Probe URL construction.

/// Compose a request URL from an anchored path, optional extra query
/// fragments and an optional access token.
///
/// `extra_params` are pre-encoded `key=value` fragments and are emitted
/// before the token fragment. A `None` or empty token adds nothing. When
/// no fragments remain the path is returned untouched, without a `?`.
pub fn build_url(path: &str, token: Option<&str>, extra_params: &[String]) -> String {
    let mut params: Vec<String> = extra_params
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect();

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        params.push(format!("token={}", token));
    }

    if params.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, params.join("&"))
    }
}

/// Format an ordered key/value list as `key=value` fragments.
pub fn query_fragments(params: &[(String, String)]) -> Vec<String> {
    params.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "http://localhost:60202/api/v1/status";

    #[test]
    fn test_no_token_no_params_returns_path() {
        assert_eq!(build_url(PATH, None, &[]), PATH);
        assert_eq!(build_url(PATH, Some(""), &[]), PATH);
    }

    #[test]
    fn test_token_only() {
        assert_eq!(
            build_url(PATH, Some("secret"), &[]),
            format!("{}?token=secret", PATH)
        );
    }

    #[test]
    fn test_params_precede_token() {
        let url = build_url(
            "http://localhost:60202/api/v1/player",
            Some("secret"),
            &["name=Steve".to_string()],
        );
        assert_eq!(
            url,
            "http://localhost:60202/api/v1/player?name=Steve&token=secret"
        );
    }

    #[test]
    fn test_params_without_token() {
        let url = build_url(
            "http://localhost:60202/api/v1/player",
            None,
            &["name=Steve".to_string(), "detail=full".to_string()],
        );
        assert_eq!(
            url,
            "http://localhost:60202/api/v1/player?name=Steve&detail=full"
        );
    }

    #[test]
    fn test_deterministic() {
        let params = vec!["name=Alex".to_string()];
        let a = build_url(PATH, Some("t"), &params);
        let b = build_url(PATH, Some("t"), &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_fragments_keep_order() {
        let params = vec![
            ("name".to_string(), "Steve".to_string()),
            ("world".to_string(), "overworld".to_string()),
        ];
        assert_eq!(
            query_fragments(&params),
            vec!["name=Steve".to_string(), "world=overworld".to_string()]
        );
    }
}
