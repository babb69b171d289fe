use crate::parser::ParseError;

/// The tokens of a failed parse, along with the byte offset of the failure.
/// Offsets count the bytes of the tokens, excluding the spaces that join them.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let projection = self.tokens.join(" ");
        let total: usize = self.tokens.iter().map(String::len).sum();
        // An offset past the final token points at its last character.
        let target = std::cmp::min(self.offset, total.saturating_sub(1));
        let mut consumed = 0;
        let mut spaces = 0;

        for token in &self.tokens {
            if target < consumed + token.len() {
                break;
            }

            consumed += token.len();
            spaces += 1;
        }

        // The caret sits under the character containing the target byte.
        let column = if total == 0 {
            0
        } else {
            let byte_index = target + spaces;
            projection
                .char_indices()
                .take_while(|(index, _)| *index <= byte_index)
                .count()
                .saturating_sub(1)
        };
        write!(f, "{projection}\n{:column$}^", "")
    }
}

pub(crate) trait UserInterface {
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print_error(&self, error: ParseError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::{ErrorContext, ParseError, UserInterface};
    use std::cell::RefCell;
    use std::sync::mpsc;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        error: RefCell<Option<String>>,
        error_context: RefCell<Option<ErrorContext>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print_error(&self, error: ParseError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<ErrorContext>) {
            let InMemoryInterface {
                error,
                error_context,
            } = self;
            (error.take(), error_context.take())
        }
    }

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (error_tx, error_rx) = mpsc::channel();
        let (error_context_tx, error_context_rx) = mpsc::channel();
        let sender = SenderInterface {
            error_tx,
            error_context_tx,
        };
        let receiver = ReceiverInterface {
            error_rx,
            error_context_rx,
        };
        (sender, receiver)
    }

    pub(crate) struct SenderInterface {
        error_tx: mpsc::Sender<Option<String>>,
        error_context_tx: mpsc::Sender<Option<ErrorContext>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.error_tx.send(None).unwrap();
            self.error_context_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print_error(&self, error: ParseError) {
            self.error_tx.send(Some(error.to_string())).unwrap();
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.error_context_tx.send(Some(error_context)).unwrap();
        }
    }

    /// Collects what was sent to the paired `SenderInterface`, once it has been dropped.
    pub(crate) struct ReceiverInterface {
        error_rx: mpsc::Receiver<Option<String>>,
        error_context_rx: mpsc::Receiver<Option<ErrorContext>>,
    }

    impl ReceiverInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<ErrorContext>) {
            let ReceiverInterface {
                error_rx,
                error_context_rx,
            } = self;

            (drain(error_rx), first(error_context_rx))
        }
    }

    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Option<String> {
        let mut values = Vec::default();

        while let Some(message) = receiver.recv().unwrap() {
            values.push(message);
        }

        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }

    fn first(receiver: mpsc::Receiver<Option<ErrorContext>>) -> Option<ErrorContext> {
        let value = receiver.recv().unwrap();

        if value.is_some() {
            // Swallow the terminating `None`.
            assert_eq!(receiver.recv().unwrap(), None, "error context printed twice");
        }

        value
    }
}
