//! Webview lane: a tao window hosting a wry webview, with the
//! interceptor wired as the navigation handler and all document
//! mutations routed through the event loop's user-event queue.

use gw_core::ShellConfig;
use gw_core::ShellError;
use gw_core::ShellResult;
use gw_host::BrowserControl;
use gw_host::ContextDispatcher;
use gw_host::HostCommand;
use tao::dpi::LogicalSize;
use tao::event::Event;
use tao::event::WindowEvent;
use tao::event_loop::ControlFlow;
use tao::event_loop::EventLoopBuilder;
use tao::event_loop::EventLoopProxy;
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

/// Routes commands onto the event-loop thread. tao delivers user
/// events in send order, which preserves the FIFO dispatch contract.
#[derive(Clone)]
struct EventLoopDispatcher {
    proxy: EventLoopProxy<HostCommand>,
}

impl ContextDispatcher for EventLoopDispatcher {
    fn dispatch(&self, command: HostCommand) -> ShellResult<()> {
        self.proxy.send_event(command).map_err(|_| {
            ShellError::new("host.dispatch_closed", "event loop is gone; command dropped")
        })
    }
}

struct WryControl {
    webview: wry::WebView,
}

impl BrowserControl for WryControl {
    fn evaluate(&self, script: &str) -> ShellResult<()> {
        self.webview.evaluate_script(script).map_err(|error| {
            ShellError::new("host.evaluate_failed", format!("script evaluation failed: {error}"))
        })
    }

    fn navigate(&self, url: &str) -> ShellResult<()> {
        self.webview.load_url(url).map_err(|error| {
            ShellError::new("host.navigate_failed", format!("failed to load `{url}`: {error}"))
        })
    }

    fn set_user_agent(&self, _user_agent: &str) -> ShellResult<()> {
        // wry fixes the user agent at webview creation; run() already
        // passed it to the builder.
        Err(ShellError::new(
            "host.user_agent_immutable",
            "user agent cannot change after the webview is built",
        ))
    }
}

pub(crate) fn run(config: ShellConfig) -> ShellResult<()> {
    let event_loop = EventLoopBuilder::<HostCommand>::with_user_event().build();
    let dispatcher = EventLoopDispatcher {
        proxy: event_loop.create_proxy(),
    };
    let interceptor = super::build_interceptor(&config, dispatcher);

    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(LogicalSize::new(
            f64::from(config.window_width),
            f64::from(config.window_height),
        ))
        .build(&event_loop)
        .map_err(|error| {
            ShellError::new("shell.window_failed", format!("window creation failed: {error}"))
        })?;

    // User agent and the initial blank page are part of the startup
    // contract and must be in place before the first real navigation.
    let builder = WebViewBuilder::new()
        .with_user_agent(&config.user_agent)
        .with_url("about:blank")
        .with_navigation_handler(move |url| interceptor.decide(&url).allows_navigation());

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window);
    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().ok_or_else(|| {
            ShellError::new("shell.webview_failed", "window has no gtk vbox to attach to")
        })?;
        builder.build_gtk(vbox)
    };
    let webview = webview.map_err(|error| {
        ShellError::new("shell.webview_failed", format!("webview creation failed: {error}"))
    })?;
    let control = WryControl { webview };

    event_loop.run(move |event, _target, control_flow| {
        *control_flow = ControlFlow::Wait;
        // The window must outlive the loop or the webview goes blank.
        let _keep_alive = &window;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::UserEvent(command) => {
                if let Err(error) = gw_host::apply_command(&control, &command) {
                    log::warn!("host command failed: {error}");
                }
            }
            _ => {}
        }
    })
}
