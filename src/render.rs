//! Server-side page rendering pipeline.
//! Used by: handlers::page.
//!
//! `prepare_render` gathers everything a document needs (baseline page
//! properties plus the browser timing header); `render_document` turns the
//! prepared properties into markup. The two steps stay separate so the
//! async preparation can be awaited independently of templating.

use askama::Template;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::monitoring::agent::RumAgent;
use crate::monitoring::snippet::SnippetOptions;
use crate::state::AppStateInner;

pub const APPLICATION: &str = "pagebeacon";

/// Per-request data describing the page being rendered.
pub struct RenderContext {
    pub pathname: String,
}

#[derive(Debug)]
pub struct PageProps {
    pub title: String,
    pub content: String,
}

pub struct RenderProps {
    pub page: PageProps,
    pub browser_timing_header: String,
}

/// Baseline preparation step: resolves the registered page for a pathname.
/// Unknown paths fail with `PageNotFound`, which maps to the usual 404.
pub fn default_props(ctx: &RenderContext) -> Result<PageProps> {
    match ctx.pathname.as_str() {
        "/" => Ok(PageProps {
            title: "pagebeacon".into(),
            content: "<h1>pagebeacon</h1>\
                      <p>Server-rendered pages with browser monitoring baked in.</p>\
                      <p>The user directory lives at <code>/api/users</code>.</p>"
                .into(),
        }),
        "/about" => Ok(PageProps {
            title: "About — pagebeacon".into(),
            content: "<h1>About</h1>\
                      <p>Every render ships a timing snippet so the collector can \
                      watch real page loads.</p>"
                .into(),
        }),
        _ => Err(Error::PageNotFound(ctx.pathname.clone())),
    }
}

/// Prepares the extended properties for one render: baseline props merged
/// with the monitoring snippet. Emits exactly one info log per call.
pub async fn prepare_render(state: &AppStateInner, ctx: &RenderContext) -> Result<RenderProps> {
    let page = default_props(ctx)?;

    let browser_timing_header = match state.agent.as_deref() {
        Some(agent) => snippet_for(state, agent, ctx).await,
        None => String::new(),
    };

    tracing::info!(
        application = APPLICATION,
        test = "render-pipeline",
        pathname = %ctx.pathname,
        "page render prepared"
    );

    Ok(RenderProps {
        page,
        browser_timing_header,
    })
}

/// Waits for agent connectivity when it explicitly reports disconnected,
/// bounded by the configured wait. On timeout the render proceeds without
/// a snippet rather than holding the page hostage to the collector.
async fn snippet_for(state: &AppStateInner, agent: &dyn RumAgent, ctx: &RenderContext) -> String {
    if !agent.is_connected() {
        state.metrics.record_render_waited();
        let mut receiver = agent.state();
        let connected = timeout(
            state.connect_wait,
            receiver.wait_for(|s| s.is_connected()),
        )
        .await;
        if !matches!(connected, Ok(Ok(_))) {
            state.metrics.record_render_degraded();
            tracing::warn!(
                pathname = %ctx.pathname,
                wait_ms = state.connect_wait.as_millis() as u64,
                "agent not connected within wait bound, rendering without snippet"
            );
            return String::new();
        }
    }

    agent.browser_timing_header(&SnippetOptions {
        remove_script_wrapper: true,
        allow_transactionless: true,
    })
}

#[derive(Template)]
#[template(path = "document.html")]
struct DocumentTemplate<'a> {
    title: &'a str,
    content: &'a str,
    browser_timing_header: &'a str,
}

/// Assembles the document skeleton. The timing header is inserted raw;
/// the agent is trusted to produce safe output and never sees request
/// input.
pub fn render_document(props: &RenderProps) -> Result<String> {
    let document = DocumentTemplate {
        title: &props.page.title,
        content: &props.page.content,
        browser_timing_header: &props.browser_timing_header,
    };
    Ok(document.render()?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::monitoring::agent::testing::FakeAgent;
    use crate::state::build_test_state_with_agent;

    fn ctx(pathname: &str) -> RenderContext {
        RenderContext {
            pathname: pathname.into(),
        }
    }

    #[test]
    fn default_props_resolves_registered_pages() {
        assert!(default_props(&ctx("/")).is_ok());
        assert!(default_props(&ctx("/about")).is_ok());
    }

    #[test]
    fn default_props_rejects_unknown_path() {
        let err = default_props(&ctx("/missing")).unwrap_err();
        assert!(matches!(err, Error::PageNotFound(p) if p == "/missing"));
    }

    #[tokio::test]
    async fn connected_agent_resolves_without_suspending() {
        let agent = FakeAgent::new(true);
        let state = build_test_state_with_agent(agent.clone(), Duration::from_secs(5)).unwrap();

        let props = timeout(Duration::from_millis(50), prepare_render(&state, &ctx("/")))
            .await
            .expect("must not suspend")
            .unwrap();

        assert_eq!(props.browser_timing_header, agent.header);
        assert_eq!(state.metrics.snapshot().renders_waited, 0);
    }

    #[tokio::test]
    async fn disconnected_agent_blocks_until_connected_event() {
        let agent = FakeAgent::new(false);
        let state = build_test_state_with_agent(agent.clone(), Duration::from_secs(5)).unwrap();

        let context = ctx("/");
        let fut = prepare_render(&state, &context);
        tokio::pin!(fut);

        assert!(
            timeout(Duration::from_millis(50), &mut fut).await.is_err(),
            "must stay pending before the connected event"
        );

        agent.connect();
        let props = timeout(Duration::from_secs(1), &mut fut)
            .await
            .expect("must resolve after the connected event")
            .unwrap();

        assert!(!props.browser_timing_header.is_empty());
        assert_eq!(state.metrics.snapshot().renders_waited, 1);
        assert_eq!(state.metrics.snapshot().renders_degraded, 0);
    }

    #[tokio::test]
    async fn never_connecting_agent_degrades_after_wait_bound() {
        let agent = FakeAgent::new(false);
        let state = build_test_state_with_agent(agent, Duration::from_millis(30)).unwrap();

        let props = prepare_render(&state, &ctx("/")).await.unwrap();

        assert!(props.browser_timing_header.is_empty());
        assert_eq!(state.metrics.snapshot().renders_degraded, 1);
    }

    #[tokio::test]
    async fn missing_agent_renders_with_empty_header() {
        let state = crate::state::build_test_state().unwrap();
        let props = prepare_render(&state, &ctx("/about")).await.unwrap();
        assert!(props.browser_timing_header.is_empty());
    }

    #[test]
    fn document_embeds_header_unescaped_before_stylesheet() {
        let props = RenderProps {
            page: PageProps {
                title: "t".into(),
                content: "<h1>c</h1>".into(),
            },
            browser_timing_header: "window.__rumConfig={\"app\":\"x\"}".into(),
        };
        let html = render_document(&props).unwrap();

        let script = html.find("window.__rumConfig={\"app\":\"x\"}").unwrap();
        let stylesheet = html.find("/style.css").unwrap();
        let content = html.find("<h1>c</h1>").unwrap();
        let bootstrap = html.find("/app.js").unwrap();

        assert!(script < stylesheet, "snippet precedes the stylesheet link");
        assert!(content < bootstrap, "content precedes the client bootstrap");
    }

    #[test]
    fn document_escapes_title_but_not_content() {
        let props = RenderProps {
            page: PageProps {
                title: "a<b".into(),
                content: "<em>ok</em>".into(),
            },
            browser_timing_header: String::new(),
        };
        let html = render_document(&props).unwrap();
        assert!(html.contains("a&lt;b"));
        assert!(html.contains("<em>ok</em>"));
    }
}
