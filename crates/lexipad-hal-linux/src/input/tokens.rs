//! Keypad tokens read line by line from a byte stream.

use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use lexipad_core::input::{EventRepeat, InputEvent, InputProvider};
use log::{debug, info};

enum Message {
    Line(String),
    ReadFailed(io::Error),
    End,
    Interrupt,
}

/// Ends a [`TokenInput`] from another thread, e.g. a signal handler.
#[derive(Clone)]
pub struct Interrupter {
    tx: Sender<Message>,
}

impl Interrupter {
    pub fn interrupt(&self) {
        let _ = self.tx.send(Message::Interrupt);
    }
}

/// One token per line; a reader thread feeds the lines into a channel.
///
/// End of stream and [`Interrupter::interrupt`] both end the input.
pub struct TokenInput {
    rx: Receiver<Message>,
    tx: Sender<Message>,
    repeat: EventRepeat,
    finished: bool,
}

impl TokenInput {
    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let reader_tx = tx.clone();
        thread::Builder::new()
            .name("lexipad-tokens".into())
            .spawn(move || read_lines(reader, reader_tx))?;

        Ok(Self {
            rx,
            tx,
            repeat: EventRepeat::new(),
            finished: false,
        })
    }

    pub fn stdin() -> io::Result<Self> {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            tx: self.tx.clone(),
        }
    }
}

fn read_lines<R: BufRead>(reader: R, tx: Sender<Message>) {
    for line in reader.lines() {
        let message = match line {
            Ok(line) => Message::Line(line),
            Err(err) => Message::ReadFailed(err),
        };
        let failed = matches!(message, Message::ReadFailed(_));
        if tx.send(message).is_err() || failed {
            return;
        }
    }
    let _ = tx.send(Message::End);
}

impl InputProvider for TokenInput {
    type Error = io::Error;

    fn next_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        if self.finished {
            return Ok(None);
        }

        loop {
            let message = self.rx.recv().unwrap_or(Message::End);
            match message {
                Message::Line(token) => {
                    if let Some(event) = self.repeat.resolve(&token) {
                        return Ok(Some(event));
                    }
                    debug!("input: ignored token {:?}", token);
                }
                Message::ReadFailed(err) => {
                    self.finished = true;
                    return Err(err);
                }
                Message::End => {
                    info!("input: end of stream");
                    self.finished = true;
                    return Ok(None);
                }
                Message::Interrupt => {
                    info!("input: interrupted");
                    self.finished = true;
                    return Ok(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn drain(input: &mut TokenInput) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(event) = input.next_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn tokens_become_events_and_blank_lines_repeat() {
        let mut input = TokenInput::from_reader(Cursor::new("up\n\nzz\nri\r\nc\n \n")).unwrap();

        assert_eq!(
            drain(&mut input),
            [
                InputEvent::Up,
                InputEvent::Up,
                InputEvent::Right,
                InputEvent::Char('c'),
                InputEvent::Char(' '),
            ]
        );
        assert_eq!(input.next_event().unwrap(), None);
    }

    /// Reader that never yields, like an idle terminal.
    struct Idle;

    impl io::Read for Idle {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            thread::park();
            Ok(0)
        }
    }

    #[test]
    fn interrupt_ends_a_blocked_input() {
        let mut input = TokenInput::from_reader(io::BufReader::new(Idle)).unwrap();
        let interrupter = input.interrupter();

        thread::spawn(move || interrupter.interrupt());

        assert_eq!(input.next_event().unwrap(), None);
        assert_eq!(input.next_event().unwrap(), None);
    }
}
