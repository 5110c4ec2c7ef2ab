use super::*;
use crate::client::HostPolicy;

fn offline_client() -> PageClient {
    PageClient::new(
        5,
        "clipstrip-test/0.1",
        HostPolicy::AllowList(vec!["shopee.com.br".to_string()]),
    )
    .expect("client builds")
}

// ---------------------------------------------------------------------------
// unwrap_universal_link
// ---------------------------------------------------------------------------

#[test]
fn unwrap_ignores_non_universal_links() {
    let url = "https://shopee.com.br/product/123/456";
    assert_eq!(unwrap_universal_link(url), None);
}

#[test]
fn unwrap_decodes_redir_parameter() {
    let url = "https://shopee.com.br/universal-link?redir=https%3A%2F%2Fshopee.com.br%2Fproduct%2F1%2F2%3Fsp_atk%3Dabc&deep_and_web=1";
    assert_eq!(
        unwrap_universal_link(url).as_deref(),
        Some("https://shopee.com.br/product/1/2?sp_atk=abc")
    );
}

#[test]
fn unwrap_decodes_double_encoded_redir() {
    // %253A -> %3A (query parser) -> ':' (second pass)
    let url = "https://shopee.com.br/universal-link?redir=https%253A%252F%252Fshopee.com.br%252Fvideo%252F9";
    assert_eq!(
        unwrap_universal_link(url).as_deref(),
        Some("https://shopee.com.br/video/9")
    );
}

#[test]
fn unwrap_returns_none_without_redir() {
    let url = "https://shopee.com.br/universal-link?deep_and_web=1";
    assert_eq!(unwrap_universal_link(url), None);
}

#[test]
fn unwrap_skips_blank_redir_values() {
    let url = "https://shopee.com.br/universal-link?redir=&redir=https%3A%2F%2Fshopee.com.br%2Fp%2F7";
    assert_eq!(
        unwrap_universal_link(url).as_deref(),
        Some("https://shopee.com.br/p/7")
    );
}

#[test]
fn unwrap_reads_query_of_link_pasted_without_scheme() {
    let url = "shopee.com.br/universal-link?redir=https%253A%252F%252Fshopee.com.br%252Fproduct%252F1%252F2";
    assert_eq!(
        unwrap_universal_link(url).as_deref(),
        Some("https://shopee.com.br/product/1/2")
    );
}

#[test]
fn unwrap_without_scheme_ignores_fragment_and_blank_values() {
    let url = "shopee.com.br/universal-link?redir=%20&redir=https%3A%2F%2Fshopee.com.br%2Fp%2F3#top";
    assert_eq!(
        unwrap_universal_link(url).as_deref(),
        Some("https://shopee.com.br/p/3")
    );
}

#[test]
fn unwrap_without_scheme_or_query_returns_none() {
    assert_eq!(unwrap_universal_link("shopee.com.br/universal-link"), None);
}

// ---------------------------------------------------------------------------
// normalize_url
// ---------------------------------------------------------------------------

#[tokio::test]
async fn plain_url_is_returned_trimmed_and_unchanged() {
    let client = offline_client();
    let mut trace = TraceLog::new();

    let result = normalize_url(&client, "  https://shopee.com.br/product/1/2 \n", &mut trace).await;

    assert_eq!(
        result,
        Normalization::Resolved("https://shopee.com.br/product/1/2".to_string())
    );
    assert_eq!(trace.lines(), ["initial: https://shopee.com.br/product/1/2"]);
}

#[tokio::test]
async fn universal_link_is_unwrapped_without_network() {
    let client = offline_client();
    let mut trace = TraceLog::new();

    let result = normalize_url(
        &client,
        "https://shopee.com.br/universal-link?redir=https%3A%2F%2Fshopee.com.br%2Fproduct%2F5%2F6",
        &mut trace,
    )
    .await;

    assert_eq!(result.url(), "https://shopee.com.br/product/5/6");
    assert!(!result.is_degraded());
    assert_eq!(
        trace.lines().last().map(String::as_str),
        Some("after redir decode: https://shopee.com.br/product/5/6")
    );
}

#[tokio::test]
async fn short_link_outside_allow_list_degrades_to_input() {
    let client = offline_client();
    let mut trace = TraceLog::new();

    let result = normalize_url(&client, "https://br.shp.ee/abc123", &mut trace).await;

    assert!(result.is_degraded(), "expected degradation, got: {result:?}");
    assert_eq!(result.url(), "https://br.shp.ee/abc123");
    assert!(
        trace
            .lines()
            .last()
            .is_some_and(|l| l.starts_with("normalize error:")),
        "trace should end with the failure cause: {trace:?}"
    );
}

#[tokio::test]
async fn universal_link_without_scheme_is_unwrapped() {
    let client = offline_client();
    let mut trace = TraceLog::new();

    let result = normalize_url(
        &client,
        " shopee.com.br/universal-link?redir=https%3A%2F%2Fshopee.com.br%2Fproduct%2F1%2F2 ",
        &mut trace,
    )
    .await;

    assert_eq!(
        result,
        Normalization::Resolved("https://shopee.com.br/product/1/2".to_string())
    );
    assert_eq!(
        trace.lines(),
        [
            "initial: shopee.com.br/universal-link?redir=https%3A%2F%2Fshopee.com.br%2Fproduct%2F1%2F2",
            "after redir decode: https://shopee.com.br/product/1/2",
        ]
    );
}
