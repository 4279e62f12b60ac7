/// # Timers
/// Two 8-bit counters that count down to 0 at 60Hz.
/// - `delay` is readable by programs and is used for pacing
/// - `sound` plays a tone for as long as it's above 0
///
/// Nothing here knows about wall-clock time; whoever drives the machine calls `tick` 60 times a
/// second regardless of how many instructions it runs in between.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    /// DT -= 1, stopping at 0
    pub fn decrement_delay(&mut self) {
        self.delay = self.delay.saturating_sub(1);
    }

    /// ST -= 1, stopping at 0
    /// Returns true only on the tick where the counter lands on 0.
    pub fn decrement_sound(&mut self) -> bool {
        if self.sound == 0 {
            return false;
        }
        self.sound -= 1;
        self.sound == 0
    }

    /// Decrements both timers once. Returns true if the sound should stop.
    pub fn tick(&mut self) -> bool {
        self.decrement_delay();
        self.decrement_sound()
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
