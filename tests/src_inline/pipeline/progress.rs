use super::*;

#[derive(Default)]
struct Recorder {
    seen: Vec<(usize, usize)>,
    finished: bool,
}

impl ProgressObserver for Recorder {
    fn advance(&mut self, completed: usize, total: usize) {
        self.seen.push((completed, total));
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

#[test]
fn test_steps_are_reported_in_order() {
    let mut rec = Recorder::default();
    {
        let mut progress = Progress::new(3, &mut rec);
        progress.step();
        progress.step();
        progress.step();
        assert_eq!(progress.completed(), 3);
        progress.finish();
    }
    assert_eq!(rec.seen, vec![(1, 3), (2, 3), (3, 3)]);
    assert!(rec.finished);
}

#[test]
fn test_completed_stops_at_total() {
    let mut rec = Recorder::default();
    {
        let mut progress = Progress::new(1, &mut rec);
        progress.step();
        progress.step();
        assert_eq!(progress.completed(), 1);
    }
    assert_eq!(rec.seen, vec![(1, 1)]);
}

#[test]
fn test_empty_run_reports_nothing() {
    let mut rec = Recorder::default();
    {
        let mut progress = Progress::new(0, &mut rec);
        progress.step();
        assert_eq!(progress.completed(), 0);
    }
    assert!(rec.seen.is_empty());
}

#[test]
fn test_bar_tracks_position() {
    let mut bar = BarProgress::new("testing");
    bar.advance(2, 4);
    assert_eq!(bar.bar.length(), Some(4));
    assert_eq!(bar.bar.position(), 2);
    bar.finish();
    assert!(bar.bar.is_finished());
}
