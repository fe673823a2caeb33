//! Interactive validation shell.
//!
//! Reads one card number per line, prints the Luhn result and the scheme,
//! and asks whether to continue. The session can be cancelled at any point
//! through a `watch` channel, which the binary wires to SIGINT/SIGTERM.
//!
//! Requires the `cli` feature.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

use crate::validate::Validator;

const WELCOME: &str = "Welcome to the Card Validator!";
const ASK_CARD: &str = "Please enter a card number for validation or enter n to exit:";
const CARD_PROMPT: &str = "Card Number: ";
const ASK_AGAIN: &str =
    "Do you want to validate another card? Enter 1 to continue, or press 'n' to exit:";
const CHOICE_PROMPT: &str = "Choice: ";
const GOODBYE: &str = "Thank you for using the Card Validator!";
const CANCELLED_IDLE: &str = "Session timed out or interrupted. Exiting...";
const CANCELLED_WAITING: &str = "session timed out or interrupted. Exiting";

/// What a prompt produced.
enum Input {
    Line(String),
    Eof,
    Cancelled,
}

/// The interactive shell over any [`Validator`].
///
/// # Example
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> std::io::Result<()> {
/// use card_validator::{shell::Shell, CardValidator};
/// use tokio::sync::watch;
///
/// let validator = CardValidator::default();
/// let (_tx, rx) = watch::channel(false);
/// let mut out = Vec::new();
///
/// Shell::new(&validator)
///     .run(&b"4012888888881881\nn\n"[..], &mut out, rx)
///     .await?;
///
/// let transcript = String::from_utf8(out).unwrap();
/// assert!(transcript.contains("  - Card Scheme: Visa"));
/// assert!(transcript.ends_with("Thank you for using the Card Validator!\n"));
/// # Ok(())
/// # }
/// ```
pub struct Shell<'a> {
    validator: &'a dyn Validator,
}

impl<'a> Shell<'a> {
    /// Creates a shell that checks cards with `validator`.
    pub fn new(validator: &'a dyn Validator) -> Self {
        Self { validator }
    }

    /// Runs the session until the user exits, input ends, or `cancel`
    /// becomes `true`.
    ///
    /// Only I/O failures on `output` or `input` are returned as errors.
    pub async fn run<R, W>(
        &self,
        mut input: R,
        output: &mut W,
        mut cancel: watch::Receiver<bool>,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        tracing::debug!("shell session started");
        writeln!(output, "{}", WELCOME)?;

        loop {
            if *cancel.borrow() {
                writeln!(output, "{}", CANCELLED_IDLE)?;
                break;
            }

            writeln!(output, "{}", ASK_CARD)?;
            prompt(output, CARD_PROMPT)?;

            let card = match next_line(&mut input, &mut cancel).await? {
                Input::Line(line) => line,
                Input::Eof => {
                    writeln!(output, "{}", GOODBYE)?;
                    break;
                }
                Input::Cancelled => {
                    writeln!(output, "{}", CANCELLED_WAITING)?;
                    break;
                }
            };

            if card == "n" || card == "N" {
                writeln!(output, "{}", GOODBYE)?;
                break;
            }

            let valid = match self.validator.validate_number(&card) {
                Ok(valid) => valid,
                Err(err) => {
                    writeln!(output, "Card number validation failed: {}", err)?;
                    continue;
                }
            };
            let scheme = match self.validator.classify_scheme(&card) {
                Ok(scheme) => scheme,
                Err(err) => {
                    writeln!(output, "Card scheme detection failed: {}", err)?;
                    continue;
                }
            };

            writeln!(output, "Card validation results:")?;
            writeln!(output, "  - Valid: {}", valid)?;
            writeln!(output, "  - Card Scheme: {}", scheme)?;

            writeln!(output, "{}", ASK_AGAIN)?;
            prompt(output, CHOICE_PROMPT)?;

            match next_line(&mut input, &mut cancel).await? {
                Input::Line(choice) if choice == "1" => {}
                Input::Cancelled => {
                    writeln!(output, "{}", CANCELLED_WAITING)?;
                    break;
                }
                Input::Line(_) | Input::Eof => {
                    writeln!(output, "{}", GOODBYE)?;
                    break;
                }
            }
        }

        output.flush()?;
        tracing::debug!("shell session ended");
        Ok(())
    }
}

fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

/// Reads one line, or gives up as soon as `cancel` flips to `true`.
async fn next_line<R>(input: &mut R, cancel: &mut watch::Receiver<bool>) -> io::Result<Input>
where
    R: AsyncBufRead + Unpin,
{
    let read = async {
        let mut line = String::new();
        let n = input.read_line(&mut line).await?;
        Ok::<_, io::Error>((n, line))
    };

    tokio::select! {
        biased;
        _ = cancelled(cancel) => Ok(Input::Cancelled),
        result = read => {
            let (n, mut line) = result?;
            if n == 0 {
                return Ok(Input::Eof);
            }
            while line.ends_with('\n') || line.ends_with('\r') {
                line.pop();
            }
            Ok(Input::Line(line))
        }
    }
}

/// Resolves once cancellation is requested. A dropped sender never cancels.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|flag| *flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}
