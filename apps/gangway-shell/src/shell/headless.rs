//! Headless lane: classifies URLs given on the command line against a
//! logging control. Useful for smoke-testing handshake links without a
//! platform webview.

use gw_core::ShellConfig;
use gw_core::ShellResult;
use gw_host::BrowserControl;
use gw_host::SingleContextQueue;

struct LoggingControl;

impl BrowserControl for LoggingControl {
    fn evaluate(&self, script: &str) -> ShellResult<()> {
        log::info!("evaluate: {script}");
        Ok(())
    }

    fn navigate(&self, url: &str) -> ShellResult<()> {
        log::info!("navigate: {url}");
        Ok(())
    }

    fn set_user_agent(&self, user_agent: &str) -> ShellResult<()> {
        log::info!("user agent: {user_agent}");
        Ok(())
    }
}

pub(crate) fn run(config: ShellConfig) -> ShellResult<()> {
    let (queue, worker) = SingleContextQueue::start(LoggingControl);
    let interceptor = super::build_interceptor(&config, queue.clone());
    super::schedule_startup(&queue, &config)?;

    for raw_url in std::env::args().skip(1) {
        let decision = interceptor.decide(&raw_url);
        println!("{raw_url} -> {decision:?}");
    }

    queue.shutdown()?;
    worker.join()
}
