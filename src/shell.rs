use anyhow::{Context, Result};
use authenticator_mobile_core::{
    App, ConfigEvent, Effect, Event, HttpRequest, HttpResult, Model, ScreenId, ViewModel,
};
use crux_core::{Core, Request};
use log::{debug, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use crate::{
    config::ShellConfig,
    http_client::HttpExecutor,
    input::{self, Input},
    render::render,
};

/// Cancellation scope of the mounted screen instance
struct RequestScope {
    screen: ScreenId,
    token: CancellationToken,
}

impl RequestScope {
    fn new(screen: ScreenId) -> Self {
        Self {
            screen,
            token: CancellationToken::new(),
        }
    }
}

/// An executed HTTP request waiting to be resolved in the core
pub struct Reply {
    request: Request<HttpRequest>,
    result: HttpResult,
}

/// Drives the core: dispatches events, executes effects and resolves HTTP
/// requests with their results.
pub struct Shell<E> {
    core: Core<App>,
    executor: E,
    scope: RequestScope,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
}

impl<E> Shell<E>
where
    E: HttpExecutor + Clone + Send + Sync + 'static,
{
    pub fn new(executor: E) -> Self {
        Self::with_model(executor, Model::default())
    }

    /// Shell whose core starts from `model`
    pub fn with_model(executor: E, model: Model) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        Self {
            scope: RequestScope::new(model.screen_id),
            core: Core::new_with(App, model),
            executor,
            replies_tx,
            replies_rx,
        }
    }

    pub fn view(&self) -> ViewModel {
        self.core.view()
    }

    /// Process `event`. Returns whether the view changed.
    ///
    /// Must be called from within a tokio runtime, HTTP effects are spawned.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let effects = self.core.process_event(event);
        self.process_effects(effects)
    }

    /// Wait for the next HTTP result of the mounted screen instance.
    pub async fn next_reply(&mut self) -> Option<Reply> {
        self.replies_rx.recv().await
    }

    /// Hand an HTTP result back to the core. Returns whether the view changed.
    pub fn resolve(&mut self, reply: Reply) -> bool {
        let Reply {
            mut request,
            result,
        } = reply;

        match self.core.resolve(&mut request, result) {
            Ok(effects) => self.process_effects(effects),
            Err(e) => {
                warn!("failed to resolve HTTP request: {e}");
                false
            }
        }
    }

    fn process_effects(&mut self, effects: Vec<Effect>) -> bool {
        self.sync_scope();

        let mut changed = false;
        for effect in effects {
            match effect {
                Effect::Render(_) => changed = true,
                Effect::Http(request) => self.spawn_request(request),
            }
        }
        changed
    }

    /// Cancel requests of unmounted screen instances
    fn sync_scope(&mut self) {
        let screen = self.core.view().screen_id;
        if self.scope.screen != screen {
            debug!(
                "screen {} unmounted, cancelling its requests",
                self.scope.screen
            );
            self.scope.token.cancel();
            self.scope = RequestScope::new(screen);
        }
    }

    fn spawn_request(&self, request: Request<HttpRequest>) {
        let token = self.scope.token.clone();
        let executor = self.executor.clone();
        let replies = self.replies_tx.clone();

        let operation = request.operation.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    debug!("request to {} cancelled", operation.url);
                }
                result = executor.execute(&operation) => {
                    let reply = Reply {
                        request,
                        result: result.into(),
                    };
                    if replies.send(reply).is_err() {
                        warn!("shell stopped before the reply arrived");
                    }
                }
            }
        });
    }
}

/// What woke up the terminal loop
enum Wake {
    Input(Option<String>),
    Reply(Reply),
}

/// Interactive terminal loop
pub async fn run<E>(config: &ShellConfig, executor: E) -> Result<()>
where
    E: HttpExecutor + Clone + Send + Sync + 'static,
{
    let mut shell = Shell::new(executor);
    shell.dispatch(Event::Config(ConfigEvent::SetApiHost(
        config.api_host.clone(),
    )));
    println!("{}", render(&shell.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let wake = tokio::select! {
            line = lines.next_line() => Wake::Input(line.context("failed to read user input")?),
            Some(reply) = shell.next_reply() => Wake::Reply(reply),
        };

        let changed = match wake {
            Wake::Input(None) => {
                debug!("input closed");
                break;
            }
            Wake::Input(Some(line)) => {
                let view = shell.view();
                match input::parse(&view, &line) {
                    Ok(Input::Dispatch(event)) => shell.dispatch(event),
                    Ok(Input::Help) => {
                        println!("{}", input::help(&view.screen));
                        false
                    }
                    Ok(Input::Quit) => break,
                    Ok(Input::Empty) => false,
                    Err(hint) => {
                        println!("{hint}");
                        false
                    }
                }
            }
            Wake::Reply(reply) => shell.resolve(reply),
        };

        if changed {
            println!("{}", render(&shell.view()));
        }
    }

    if shell.view().busy {
        warn!("leaving with a request in flight, its result is discarded");
    }

    Ok(())
}
