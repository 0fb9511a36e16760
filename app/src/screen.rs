//! Terminal rendition of the "verify your email" screen
//!
//! Reads one command per line, forwards it to the flow controller and
//! leaves when the controller navigates away.

use std::collections::VecDeque;
use std::future::Future;
use std::io::{self, Write};
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

use em_core::domain::entities::SessionSnapshot;
use em_core::domain::value_objects::Route;
use em_core::errors::DomainError;
use em_core::services::analytics::AnalyticsSink;
use em_core::services::verification::{
    Navigator, Notifier, ResendOutcome, SubmitOutcome, VerificationBackend,
    VerificationFlowController,
};
use em_shared::Language;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request a new code
    Resend,
    /// Leave the screen
    Quit,
    /// Submit the line as the verification code
    Code(String),
    /// Blank line
    Empty,
}

/// Parse a line of input; anything that is not a keyword is a code
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => Command::Empty,
        "resend" | "r" => Command::Resend,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Code(trimmed.to_string()),
    }
}

/// Why the screen closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Code accepted; user sent to `route`
    Navigated(Route),
    /// User typed `quit`
    Quit,
    /// Input stream ended
    InputClosed,
    /// Ctrl-C
    Interrupted,
}

/// Status line for the resend sub-flow
pub fn render_status(snapshot: &SessionSnapshot, language: Language) -> String {
    match (snapshot.resend_allowed, language) {
        (true, Language::English) => "You can request a new code: type 'resend'".to_string(),
        (true, Language::Chinese) => "现在可以重新发送验证码：输入 'resend'".to_string(),
        (false, Language::English) => format!(
            "Resend available in {}s",
            snapshot.seconds_until_resend_allowed
        ),
        (false, Language::Chinese) => format!(
            "{} 秒后可重新发送",
            snapshot.seconds_until_resend_allowed
        ),
    }
}

fn prompt(language: Language) -> &'static str {
    match language {
        Language::English => "Enter the 6-digit code from your email ('resend' or 'quit'):",
        Language::Chinese => "请输入邮件中的 6 位验证码（'resend' 重新发送，'quit' 退出）：",
    }
}

/// Drive the controller from `input` until the screen closes
///
/// The session is disposed before returning, whatever the reason.
pub async fn run_screen<B, N, T, A, R, W>(
    controller: &VerificationFlowController<B, N, T, A>,
    mut routes: mpsc::UnboundedReceiver<Route>,
    input: R,
    out: &mut W,
    language: Language,
) -> anyhow::Result<ExitReason>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let result = screen_loop(controller, &mut routes, input, out, language).await;
    controller.dispose();
    result
}

/// Lines read but not yet acted on
struct ScreenInput<R> {
    lines: Lines<R>,
    queued: VecDeque<String>,
    open: bool,
}

impl<R: AsyncBufRead + Unpin> ScreenInput<R> {
    fn new(input: R) -> Self {
        Self {
            lines: input.lines(),
            queued: VecDeque::new(),
            open: true,
        }
    }
}

/// Result of waiting on a backend call while the screen stays responsive
enum Busy<O> {
    Finished(O),
    Left(ExitReason),
}

async fn screen_loop<B, N, T, A, R, W>(
    controller: &VerificationFlowController<B, N, T, A>,
    routes: &mut mpsc::UnboundedReceiver<Route>,
    input: R,
    out: &mut W,
    language: Language,
) -> anyhow::Result<ExitReason>
where
    B: VerificationBackend + ?Sized + 'static,
    N: Navigator + 'static,
    T: Notifier + 'static,
    A: AnalyticsSink + 'static,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut input = ScreenInput::new(input);
    let mut snapshots = controller.subscribe();
    let mut resend_was_allowed = snapshots.borrow_and_update().resend_allowed;
    let mut watching = true;
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    writeln!(out, "{}", prompt(language))?;
    writeln!(out, "{}", render_status(&controller.snapshot(), language))?;

    loop {
        let line = match input.queued.pop_front() {
            Some(line) => line,
            None if !input.open => return Ok(ExitReason::InputClosed),
            None => tokio::select! {
                Some(route) = routes.recv() => {
                    writeln!(out, "-> {}", route)?;
                    return Ok(ExitReason::Navigated(route));
                }
                line = input.lines.next_line() => match line? {
                    Some(line) => line,
                    None => return Ok(ExitReason::InputClosed),
                },
                changed = snapshots.changed(), if watching => {
                    if changed.is_err() {
                        watching = false;
                        continue;
                    }
                    let snapshot = snapshots.borrow_and_update().clone();
                    if snapshot.resend_allowed && !resend_was_allowed {
                        writeln!(out, "{}", render_status(&snapshot, language))?;
                    }
                    resend_was_allowed = snapshot.resend_allowed;
                    continue;
                }
                _ = interrupt.as_mut() => return Ok(ExitReason::Interrupted),
            },
        };

        match parse_command(&line) {
            Command::Empty => {
                writeln!(out, "{}", render_status(&controller.snapshot(), language))?;
            }
            Command::Quit => return Ok(ExitReason::Quit),
            Command::Resend => {
                let outcome =
                    match await_or_leave(controller.resend(), &mut input, interrupt.as_mut())
                        .await?
                    {
                        Busy::Finished(outcome) => outcome?,
                        Busy::Left(reason) => return Ok(reason),
                    };
                if let ResendOutcome::NotReady { .. } = outcome {
                    writeln!(out, "{}", render_status(&controller.snapshot(), language))?;
                }
            }
            Command::Code(code) => {
                controller.set_code(code);
                let result =
                    match await_or_leave(controller.submit(), &mut input, interrupt.as_mut())
                        .await?
                    {
                        Busy::Finished(result) => result,
                        Busy::Left(reason) => return Ok(reason),
                    };
                match result {
                    Ok(SubmitOutcome::Verified) => {
                        // Navigation was requested during submit
                        if let Some(route) = routes.recv().await {
                            writeln!(out, "-> {}", route)?;
                            return Ok(ExitReason::Navigated(route));
                        }
                    }
                    // The notifier has already shown the backend's message
                    Ok(SubmitOutcome::Rejected { .. }) | Ok(SubmitOutcome::Discarded) => {}
                    Err(DomainError::Verification(err)) => {
                        writeln!(out, "{}", err.localized(language))?;
                    }
                    Err(other) => return Err(other.into()),
                }
            }
        }
    }
}

/// Wait for `operation` while still accepting `quit` and Ctrl-C
///
/// Other lines typed meanwhile are queued and handled once the call returns.
/// Leaving drops `operation`; the caller disposes the session.
async fn await_or_leave<F, R, I>(
    operation: F,
    input: &mut ScreenInput<R>,
    mut interrupt: Pin<&mut I>,
) -> anyhow::Result<Busy<F::Output>>
where
    F: Future,
    R: AsyncBufRead + Unpin,
    I: Future<Output = io::Result<()>>,
{
    tokio::pin!(operation);
    loop {
        tokio::select! {
            biased;
            result = &mut operation => return Ok(Busy::Finished(result)),
            _ = interrupt.as_mut() => return Ok(Busy::Left(ExitReason::Interrupted)),
            line = input.lines.next_line(), if input.open => match line? {
                Some(line) if parse_command(&line) == Command::Quit => {
                    return Ok(Busy::Left(ExitReason::Quit));
                }
                Some(line) => input.queued.push_back(line),
                None => input.open = false,
            },
        }
    }
}
