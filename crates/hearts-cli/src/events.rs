use std::io::{self, Write};

use hearts_core::game::round::{RoundEvent, RoundObserver};

/// Writes each round event as one JSON line. The first write error is kept
/// and later events are dropped.
pub struct JsonEventLog<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonEventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_event(&mut self, event: &RoundEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> RoundObserver for JsonEventLog<W> {
    fn notify(&mut self, event: &RoundEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_event(event) {
            tracing::warn!(error = %err, "event log write failed");
            self.error = Some(err);
        }
    }
}

/// Forwards every event to each observer in order.
pub struct Fanout<'a>(pub Vec<&'a mut dyn RoundObserver>);

impl RoundObserver for Fanout<'_> {
    fn notify(&mut self, event: &RoundEvent) {
        for observer in self.0.iter_mut() {
            observer.notify(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fanout, JsonEventLog};
    use hearts_core::game::round::{RoundEvent, RoundObserver};
    use hearts_core::model::player::PlayerPosition;

    #[test]
    fn writes_one_tagged_line_per_event() {
        let mut log = JsonEventLog::new(Vec::new());
        log.notify(&RoundEvent::HeartsBroken { trick_number: 4 });
        log.notify(&RoundEvent::MoonShot {
            shooter: PlayerPosition::East,
        });
        let bytes = log.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "hearts_broken");
        assert_eq!(lines[0]["trick_number"], 4);
        assert_eq!(lines[1]["shooter"], "East");
    }

    #[test]
    fn fanout_reaches_every_observer() {
        let mut first: Vec<RoundEvent> = Vec::new();
        let mut second: Vec<RoundEvent> = Vec::new();
        {
            let observers: Vec<&mut dyn RoundObserver> = vec![&mut first, &mut second];
            let mut fanout = Fanout(observers);
            fanout.notify(&RoundEvent::HeartsBroken { trick_number: 1 });
        }
        assert_eq!(first.len(), 1);
        assert_eq!(first, second);
    }
}
