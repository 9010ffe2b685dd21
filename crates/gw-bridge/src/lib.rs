//! Navigation interception and cookie bridging.
//!
//! The core of the shell: every navigation attempt the browser control
//! reports is classified here. Attempts using the private scheme are
//! short-circuited, their cookie payload is written into the browser's
//! document through scheduled script evaluation, and a real HTTPS
//! navigation to the decoded host follows.

use gw_core::ShellConfig;
use gw_host::ContextDispatcher;
use gw_host::HostCommand;
use gw_uri::CookiePayload;
use gw_uri::NavigationRequest;
use gw_uri::RedirectTarget;

mod script;

pub use script::cookie_assignment;

/// Outcome of classifying one navigation attempt. Terminal per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptDecision {
    /// The browser proceeds with native navigation.
    Allow,
    /// The browser aborts navigation; the bridge has taken over.
    Deny,
}

impl InterceptDecision {
    /// Boolean form expected by webview navigation hooks.
    pub fn allows_navigation(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Schedules cookie writes and the follow-up HTTPS navigation onto the
/// browser control's owning context.
pub struct CookieBridge<D> {
    dispatcher: D,
}

impl<D: ContextDispatcher> CookieBridge<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// Schedules one evaluate unit per cookie entry, then exactly one
    /// navigate unit to `https://<host>`.
    ///
    /// The owning context drains its queue in FIFO order, so every
    /// cookie write lands before the navigation runs. Cookie units are
    /// not ordered relative to each other beyond dispatch order. An
    /// empty host schedules no navigate unit at all.
    pub fn apply(&self, host: &str, cookies: &CookiePayload) {
        for (name, value) in cookies.iter() {
            self.schedule(HostCommand::Evaluate {
                script: script::cookie_assignment(name, value),
            });
        }

        match RedirectTarget::for_host(host) {
            Some(target) => self.schedule(HostCommand::Navigate {
                url: target.as_str().to_owned(),
            }),
            None => log::warn!("handshake URL has no host; staying on the current page"),
        }
    }

    fn schedule(&self, command: HostCommand) {
        // Fatal to this unit only; the shell keeps running.
        if let Err(error) = self.dispatcher.dispatch(command) {
            log::warn!("failed to schedule host command: {error}");
        }
    }
}

/// Classifies navigation attempts against the configured private scheme.
///
/// A pure, stateless classifier: the bridge's own redirect re-enters
/// `decide` as a plain HTTPS URL and classifies as [`InterceptDecision::Allow`],
/// so re-entrancy is safe by construction.
pub struct NavigationInterceptor<D> {
    private_scheme: String,
    bridge: CookieBridge<D>,
}

impl<D: ContextDispatcher> NavigationInterceptor<D> {
    pub fn new(config: &ShellConfig, bridge: CookieBridge<D>) -> Self {
        Self {
            private_scheme: config.private_scheme.clone(),
            bridge,
        }
    }

    /// Synchronous allow/deny answer for one navigation attempt.
    ///
    /// Unparseable targets are refused outright rather than handed to
    /// the browser control. All other schemes pass through untouched.
    pub fn decide(&self, raw_url: &str) -> InterceptDecision {
        let request = match NavigationRequest::parse(raw_url) {
            Ok(request) => request,
            Err(error) => {
                log::warn!("refusing navigation: {error}");
                return InterceptDecision::Deny;
            }
        };

        if request.scheme() != self.private_scheme {
            return InterceptDecision::Allow;
        }

        self.bridge
            .apply(request.host(), &request.cookie_payload());
        InterceptDecision::Deny
    }
}
