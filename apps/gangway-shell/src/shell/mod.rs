use gw_bridge::CookieBridge;
use gw_bridge::NavigationInterceptor;
use gw_core::ShellConfig;
use gw_core::ShellResult;
use gw_host::ContextDispatcher;
#[cfg(not(feature = "webview"))]
use gw_host::HostCommand;

#[cfg(not(feature = "webview"))]
mod headless;
#[cfg(feature = "webview")]
mod webview;

pub(crate) fn run() -> ShellResult<()> {
    let config = ShellConfig::default();
    config.validate()?;

    #[cfg(feature = "webview")]
    {
        webview::run(config)
    }
    #[cfg(not(feature = "webview"))]
    {
        headless::run(config)
    }
}

/// Startup contract: the fixed desktop user agent, then a blank page,
/// both scheduled before any handshake can arrive. The webview lane
/// satisfies the same contract at builder time instead.
#[cfg(not(feature = "webview"))]
pub(crate) fn schedule_startup(
    dispatcher: &impl ContextDispatcher,
    config: &ShellConfig,
) -> ShellResult<()> {
    dispatcher.dispatch(HostCommand::SetUserAgent {
        user_agent: config.user_agent.clone(),
    })?;
    dispatcher.dispatch(HostCommand::Navigate {
        url: "about:blank".to_owned(),
    })?;
    Ok(())
}

pub(crate) fn build_interceptor<D: ContextDispatcher>(
    config: &ShellConfig,
    dispatcher: D,
) -> NavigationInterceptor<D> {
    NavigationInterceptor::new(config, CookieBridge::new(dispatcher))
}
