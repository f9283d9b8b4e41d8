//! Slide state machine, free of any DOM access.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Inactive,
    Active(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Enter,
    Exit,
    Next,
    Previous,
    GoTo(usize),
}

/// What a command did, so the caller knows which side effects to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Entered(usize),
    Moved { from: usize, to: usize },
    Exited,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Presentation {
    mode: Mode,
    slide_count: usize,
}

impl Presentation {
    pub fn new(slide_count: usize) -> Self {
        Self {
            mode: Mode::Inactive,
            slide_count,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn is_active(&self) -> bool {
        matches!(self.mode, Mode::Active(_))
    }

    pub fn current(&self) -> Option<usize> {
        match self.mode {
            Mode::Active(index) => Some(index),
            Mode::Inactive => None,
        }
    }

    pub fn last_index(&self) -> Option<usize> {
        self.slide_count.checked_sub(1)
    }

    pub fn dispatch(&mut self, command: Command) -> Outcome {
        match (self.mode, command) {
            (_, Command::Enter) => {
                if self.slide_count == 0 {
                    return Outcome::Ignored;
                }
                self.mode = Mode::Active(0);
                Outcome::Entered(0)
            }
            (Mode::Active(_), Command::Exit) => {
                self.mode = Mode::Inactive;
                Outcome::Exited
            }
            (Mode::Active(from), Command::Next) => self.move_to(from, from.checked_add(1)),
            (Mode::Active(from), Command::Previous) => self.move_to(from, from.checked_sub(1)),
            (Mode::Active(from), Command::GoTo(to)) => self.move_to(from, Some(to)),
            (Mode::Inactive, _) => Outcome::Ignored,
        }
    }

    fn move_to(&mut self, from: usize, to: Option<usize>) -> Outcome {
        match to {
            Some(to) if to < self.slide_count => {
                self.mode = Mode::Active(to);
                Outcome::Moved { from, to }
            }
            _ => Outcome::Ignored,
        }
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.mode, Mode::Active(index) if index > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.mode, Mode::Active(index) if index + 1 < self.slide_count)
    }

    /// Share of the deck shown so far, in percent.
    pub fn progress_percent(&self) -> f64 {
        match self.mode {
            Mode::Active(index) if self.slide_count > 0 => {
                (index + 1) as f64 / self.slide_count as f64 * 100.0
            }
            _ => 0.0,
        }
    }
}
