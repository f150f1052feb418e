//! Stat counters that count up from zero once their section scrolls into
//! view.
//!
//! Each counter is a small state machine, `Pending -> Animating -> Done`.
//! `Done` is terminal: once a counter has finished, later visibility
//! triggers leave it alone.

/// Where a counter is in its animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterPhase {
    Pending,
    Animating,
    Done,
}

/// Parses the leading integer of `text` the way the page's markup is read:
/// leading whitespace, an optional sign, then decimal digits. Anything after
/// the digits is ignored. Returns `None` when there are no digits or the
/// value doesn't fit an `i64`.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// `"%"` if the text mentions a percentage, else `"+"` if it mentions a
/// plus, else nothing.
pub fn counter_suffix(text: &str) -> &'static str {
    if text.contains('%') {
        "%"
    } else if text.contains('+') {
        "+"
    } else {
        ""
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterAnimation {
    original: String,
    target: Option<i64>,
    suffix: &'static str,
    current: f64,
    shown: String,
    phase: CounterPhase,
}

impl CounterAnimation {
    /// Reads the target and suffix from the counter's initial text. A
    /// counter without a positive target starts (and stays) `Done` showing
    /// its text untouched.
    pub fn new(text: &str) -> Self {
        let target = parse_leading_int(text);
        let phase = match target {
            Some(target) if target > 0 => CounterPhase::Pending,
            _ => CounterPhase::Done,
        };
        Self {
            original: text.to_string(),
            target,
            suffix: counter_suffix(text),
            current: 0.0,
            shown: text.to_string(),
            phase,
        }
    }

    pub fn phase(&self) -> CounterPhase {
        self.phase
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn suffix(&self) -> &'static str {
        self.suffix
    }

    /// The text the counter currently displays.
    pub fn text(&self) -> &str {
        &self.shown
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Starts a pending counter. Returns `false` (and does nothing) when the
    /// counter is already animating or done.
    pub fn start(&mut self) -> bool {
        if self.phase != CounterPhase::Pending {
            return false;
        }
        self.phase = CounterPhase::Animating;
        self.current = 0.0;
        true
    }

    /// Advances one frame and returns the new text, or `None` when the
    /// counter isn't animating.
    pub fn tick(&mut self) -> Option<&str> {
        if self.phase != CounterPhase::Animating {
            return None;
        }
        let target = self.target?;
        self.current += target as f64 / 100.0;
        if self.current >= target as f64 {
            self.phase = CounterPhase::Done;
            self.shown = format!("{}{}", target, self.suffix);
        } else {
            let value = (self.current.floor() as i64).min(target);
            self.shown = format!("{}{}", value, self.suffix);
        }
        Some(&self.shown)
    }
}

/// Every counter on the page, started together.
#[derive(Clone, Debug, Default)]
pub struct CounterBoard {
    counters: Vec<CounterAnimation>,
}

impl CounterBoard {
    pub fn new<'a, I: IntoIterator<Item = &'a str>>(texts: I) -> Self {
        Self {
            counters: texts.into_iter().map(CounterAnimation::new).collect(),
        }
    }

    /// Starts every pending counter and returns how many started.
    pub fn trigger(&mut self) -> usize {
        self.counters
            .iter_mut()
            .map(|counter| counter.start())
            .filter(|started| *started)
            .count()
    }

    /// Advances every animating counter one frame. Returns the index and new
    /// text of each counter that changed.
    pub fn tick(&mut self) -> Vec<(usize, String)> {
        self.counters
            .iter_mut()
            .enumerate()
            .filter_map(|(idx, counter)| counter.tick().map(|text| (idx, text.to_string())))
            .collect()
    }

    pub fn is_animating(&self) -> bool {
        self.counters
            .iter()
            .any(|counter| counter.phase() == CounterPhase::Animating)
    }

    pub fn counters(&self) -> &[CounterAnimation] {
        &self.counters
    }
}
