use std::time::Duration;

pub struct Sleeper {
    pub delay: Duration,
}

impl Sleeper {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn sleep(&self) {
        if !self.delay.is_zero() {
            spin_sleep::sleep(self.delay);
        }
    }
}
