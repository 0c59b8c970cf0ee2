/*!
dispatch.rs - the single generic request/format routine.

    Invocation -> CommandSpec::request -> api::fetch -> Reply

Every command goes through `Router::dispatch`; there are no per-command
handlers. Transport and parse failures are logged and turned into
`Reply::Unavailable` so an invocation always produces something to show.
*/

use chrono::Datelike;
use serde_json::{Value, json};

use crate::api::{self, Outcome, Transport};
use crate::cmd::invocation::Invocation;
use crate::cmd::template::render_block;

/// Shown when the API could not be reached or answered garbage.
pub const UNAVAILABLE_TEXT: &str = "请求失败，请稍后再试";

/// Shown for a successful response without records.
pub const EMPTY_TEXT: &str = "没有查询到相关数据";

/// What a command hands back to the host for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// One formatted block per record, in response order.
    Blocks(Vec<String>),
    /// API-reported failure, message verbatim.
    Message(String),
    Unavailable,
    /// The chat line did not bind to a command.
    Usage(String),
}

impl Reply {
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Blocks(_) => "ok",
            Reply::Message(_) => "api",
            Reply::Unavailable => "unavailable",
            Reply::Usage(_) => "usage",
        }
    }

    /// Text as the chat user sees it. Blocks are separated by a blank line.
    pub fn text(&self) -> String {
        match self {
            Reply::Blocks(blocks) if blocks.is_empty() => EMPTY_TEXT.to_string(),
            Reply::Blocks(blocks) => blocks.join("\n\n"),
            Reply::Message(msg) | Reply::Usage(msg) => msg.clone(),
            Reply::Unavailable => UNAVAILABLE_TEXT.to_string(),
        }
    }

    pub fn to_json(&self, command: Option<&str>) -> Value {
        match self {
            Reply::Blocks(blocks) => json!({
                "status": "ok",
                "command": command,
                "count": blocks.len(),
                "blocks": blocks,
            }),
            other => json!({
                "status": "error",
                "command": command,
                "kind": other.kind(),
                "message": other.text(),
            }),
        }
    }
}

/// Everything one invocation needs; shared read-only across a session.
pub struct Router<'a> {
    transport: &'a dyn Transport,
    base_url: &'a str,
    key: &'a str,
}

impl<'a> Router<'a> {
    pub fn new(transport: &'a dyn Transport, base_url: &'a str, key: &'a str) -> Self {
        Self {
            transport,
            base_url,
            key,
        }
    }

    /// Parse then dispatch one raw chat line.
    pub async fn handle_line(&self, line: &str) -> Reply {
        match Invocation::parse_line(line) {
            Ok(inv) => self.dispatch(&inv).await,
            Err(e) => Reply::Usage(e.to_string()),
        }
    }

    pub async fn handle_tokens(&self, tokens: &[String]) -> Reply {
        match Invocation::parse(tokens) {
            Ok(inv) => self.dispatch(&inv).await,
            Err(e) => Reply::Usage(e.to_string()),
        }
    }

    pub async fn dispatch(&self, inv: &Invocation) -> Reply {
        let spec = inv.spec;
        let year = chrono::Local::now().year();
        let target = spec.request(inv, year).target(self.base_url, self.key);

        match api::fetch(self.transport, &target).await {
            Ok(Outcome::Success { records }) => {
                let keep = spec
                    .limit
                    .and_then(|opt| inv.option_usize(opt))
                    .unwrap_or(records.len());
                crate::log_debug!(
                    "{}: {} record(s), showing {}",
                    spec.name,
                    records.len(),
                    keep.min(records.len())
                );
                let blocks = records
                    .iter()
                    .take(keep)
                    .map(|r| render_block(spec.template, r))
                    .collect();
                Reply::Blocks(blocks)
            }
            Ok(Outcome::Failure { message }) => {
                crate::log_info!("{}: API reported failure: {message}", spec.name);
                Reply::Message(message)
            }
            Err(e) => {
                crate::log_error!("{}: {e}", spec.name);
                Reply::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::StubTransport;
    use serde_json::json;

    const BASE: &str = "http://stub.local";

    fn hot_list(n: usize) -> String {
        let items: Vec<Value> = (1..=n)
            .map(|i| json!({"title": format!("t{i}"), "hotnum": i * 100, "digest": "d"}))
            .collect();
        json!({"code": 200, "msg": "success", "newslist": items}).to_string()
    }

    #[tokio::test]
    async fn city_lookup_scenario() {
        let body = json!({
            "code": 200,
            "newslist": [{"areacn": "重庆", "areatype": 1}]
        })
        .to_string();
        let stub = StubTransport::body(body);
        let router = Router::new(&stub, BASE, "k");

        let reply = router.handle_line("地区 重庆").await;
        match &reply {
            Reply::Blocks(blocks) => {
                assert_eq!(blocks.len(), 1);
                assert!(blocks[0].contains("级别 : 地市级"));
            }
            other => panic!("expected blocks, got {other:?}"),
        }
        assert_eq!(
            stub.seen(),
            vec!["http://stub.local/citylookup/index?key=k&area=%E9%87%8D%E5%BA%86"]
        );
    }

    #[tokio::test]
    async fn holiday_defaults_to_current_year() {
        let stub = StubTransport::body(r#"{"code":200,"newslist":[]}"#);
        let router = Router::new(&stub, BASE, "k");
        router.handle_line("节假日").await;

        let year = chrono::Local::now().year();
        assert_eq!(
            stub.seen(),
            vec![format!(
                "http://stub.local/jiejiari/index?key=k&date={year}&type=1"
            )]
        );
    }

    #[tokio::test]
    async fn holiday_explicit_year() {
        let stub = StubTransport::body(r#"{"code":200,"newslist":[]}"#);
        let router = Router::new(&stub, BASE, "k");
        router.handle_line("节假日 2021").await;
        assert!(stub.seen()[0].ends_with("&date=2021&type=1"));
    }

    #[tokio::test]
    async fn api_failure_message_is_verbatim() {
        let stub = StubTransport::body(r#"{"code":230,"msg":"invalid key"}"#);
        let router = Router::new(&stub, BASE, "bad");
        let reply = router.handle_line("花语 百合花").await;
        assert_eq!(reply, Reply::Message("invalid key".into()));
        assert_eq!(reply.text(), "invalid key");
    }

    #[tokio::test]
    async fn hot_search_truncates_client_side() {
        let stub = StubTransport::body(hot_list(5));
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("热搜 -n 2").await;
        match reply {
            Reply::Blocks(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert!(blocks[0].starts_with("标题 : t1"));
                assert!(blocks[1].starts_with("标题 : t2"));
            }
            other => panic!("expected blocks, got {other:?}"),
        }
        // -n is a display limit; it is not sent upstream
        assert_eq!(stub.seen(), vec!["http://stub.local/networkhot/index?key=k"]);
    }

    #[tokio::test]
    async fn hot_search_default_limit_is_three() {
        let stub = StubTransport::body(hot_list(5));
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("热搜").await;
        assert!(matches!(reply, Reply::Blocks(b) if b.len() == 3));
    }

    #[tokio::test]
    async fn network_failure_is_distinct() {
        let stub = StubTransport::failing("dns error");
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("v6 example.com").await;
        assert_eq!(reply, Reply::Unavailable);
        assert_eq!(reply.text(), UNAVAILABLE_TEXT);
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        let stub = StubTransport::body("<html>oops</html>");
        let router = Router::new(&stub, BASE, "k");
        assert_eq!(router.handle_line("微信热搜").await, Reply::Unavailable);
    }

    #[tokio::test]
    async fn esports_sends_defaults_and_skips_absent_word() {
        let stub = StubTransport::body(r#"{"code":200,"newslist":[]}"#);
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("电竞").await;
        assert_eq!(reply, Reply::Blocks(vec![]));
        assert_eq!(reply.text(), EMPTY_TEXT);
        assert_eq!(
            stub.seen(),
            vec!["http://stub.local/esports/index?key=k&page=1&num=3&rand=1"]
        );
    }

    #[tokio::test]
    async fn pet_unknown_category() {
        let body = json!({
            "code": 200,
            "newslist": [{"pettype": 7, "name": "奇怪的宠物"}]
        })
        .to_string();
        let stub = StubTransport::body(body);
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("宠物 -t 7").await;
        assert!(reply.text().starts_with("类型 : 未知\n名称 : 奇怪的宠物"));
        assert!(stub.seen()[0].contains("?key=k&type=7&page=1&num=3"));
    }

    #[tokio::test]
    async fn usage_errors_skip_the_network() {
        let stub = StubTransport::body("{}");
        let router = Router::new(&stub, BASE, "k");
        let reply = router.handle_line("时间").await;
        assert!(matches!(&reply, Reply::Usage(m) if m.contains("时间 <city>")));
        assert!(stub.seen().is_empty());
    }

    #[test]
    fn blocks_join_with_blank_line() {
        let reply = Reply::Blocks(vec!["a : 1".into(), "a : 2".into()]);
        assert_eq!(reply.text(), "a : 1\n\na : 2");
    }

    #[test]
    fn json_shapes() {
        let ok = Reply::Blocks(vec!["x".into()]).to_json(Some("热搜"));
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["count"], 1);

        let err = Reply::Message("invalid key".into()).to_json(Some("地区"));
        assert_eq!(err["status"], "error");
        assert_eq!(err["kind"], "api");
        assert_eq!(err["message"], "invalid key");
    }
}
