//! Browser timing snippet generation.
//! Used by: monitoring::agent.
//!
//! The snippet is first-party output embedded unescaped in the document
//! head; it must never interpolate request-derived input.

pub struct SnippetOptions {
    /// Strip the enclosing `<script>` element and return only the JS body.
    pub remove_script_wrapper: bool,
    /// Permit generation outside an active transaction.
    pub allow_transactionless: bool,
}

pub struct SnippetConfig<'a> {
    pub app_name: &'a str,
    pub beacon_url: &'a str,
    pub token: &'a str,
    pub transaction: Option<&'a str>,
}

/// Builds the browser timing header: a loader that records navigation
/// timing and posts it to the collector's beacon endpoint on page load.
/// Returns an empty string when no transaction is active and
/// transactionless injection is not allowed.
pub fn browser_snippet(config: &SnippetConfig, options: &SnippetOptions) -> String {
    if config.transaction.is_none() && !options.allow_transactionless {
        return String::new();
    }

    // serde_json handles quoting, so values can never break out of the
    // config literal.
    let rum_config = serde_json::json!({
        "app": config.app_name,
        "beacon": config.beacon_url,
        "token": config.token,
        "txn": config.transaction,
    });

    let body = format!(
        "window.__rumConfig={rum_config};\
         window.addEventListener(\"load\",function(){{\
         var t=performance.timing,c=window.__rumConfig;\
         var payload=JSON.stringify({{app:c.app,token:c.token,txn:c.txn,\
         load:t.loadEventStart-t.navigationStart}});\
         if(navigator.sendBeacon){{navigator.sendBeacon(c.beacon,payload);}}\
         }});"
    );

    if options.remove_script_wrapper {
        body
    } else {
        format!("<script type=\"text/javascript\">{body}</script>")
    }
}
