#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::signal::*;
    use crate::testing::TestObserver;
    use crate::Scheduler;
    use web_time::Duration;

    #[test]
    fn test_signal_emit_and_last() {
        let sig = Signal::new();
        assert_eq!(sig.last(), None);

        sig.emit(42);
        assert_eq!(sig.last(), Some(42));

        sig.emit(100);
        assert_eq!(sig.last(), Some(100));
    }

    #[test]
    fn test_signal_subscription() {
        let sig = Signal::new();
        let observer = TestObserver::observing(&sig);

        sig.emit(1);
        sig.emit(2);

        observer.assert_values(&[1, 2], "All emissions recorded in order");
    }

    #[test]
    fn test_signal_distinct() {
        let sig = Signal::new();
        let observer = TestObserver::observing(&sig);

        sig.emit_distinct(1);
        sig.emit_distinct(1);
        sig.emit_distinct(2);
        sig.emit_distinct(1);

        observer.assert_values(&[1, 2, 1], "Consecutive duplicates dropped");
    }

    #[test]
    fn test_signal_unsubscribe() {
        let sig = Signal::new();
        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();
        let key = sig.subscribe(move |v: &i32| sink.set(*v));

        sig.emit(1);
        assert_eq!(seen.get(), 1);

        sig.unsubscribe(key);
        sig.emit(2);
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_scheduler_zero_delay_runs_on_advance() {
        let scheduler = Scheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        scheduler.schedule(Duration::ZERO, move || flag.set(true));

        assert!(!ran.get(), "Nothing runs synchronously at schedule time");
        scheduler.advance();
        assert!(ran.get());
    }

    #[test]
    fn test_scheduler_advance_runs_chained_zero_delays() {
        let scheduler = Scheduler::new();
        let order: Rc<std::cell::RefCell<Vec<&str>>> = Rc::default();

        let inner_order = order.clone();
        let inner_scheduler = scheduler.clone();
        scheduler.schedule(Duration::ZERO, move || {
            inner_order.borrow_mut().push("first");
            let chained = inner_order.clone();
            inner_scheduler.schedule(Duration::ZERO, move || {
                chained.borrow_mut().push("second");
            });
        });

        scheduler.advance();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_scheduler_delayed_task_waits_for_clock() {
        let scheduler = Scheduler::new();
        let ran = Rc::new(Cell::new(false));

        let flag = ran.clone();
        scheduler.schedule(Duration::from_secs(3), move || flag.set(true));

        scheduler.advance();
        assert!(!ran.get(), "Not due yet");

        scheduler.advance_by(Duration::from_secs(2));
        assert!(!ran.get(), "Still one second short");

        scheduler.advance_by(Duration::from_secs(1));
        assert!(ran.get());
    }

    #[test]
    fn test_scheduler_due_order_then_fifo() {
        let scheduler = Scheduler::new();
        let order: Rc<std::cell::RefCell<Vec<&str>>> = Rc::default();

        for (delay, label) in [
            (Duration::from_secs(2), "late"),
            (Duration::from_secs(1), "early-a"),
            (Duration::from_secs(1), "early-b"),
        ] {
            let sink = order.clone();
            scheduler.schedule(delay, move || sink.borrow_mut().push(label));
        }

        scheduler.advance_by(Duration::from_secs(2));
        assert_eq!(*order.borrow(), vec!["early-a", "early-b", "late"]);
    }

    #[test]
    fn test_scheduler_clock_advances_to_target() {
        let scheduler = Scheduler::new();
        let start = scheduler.now();
        scheduler.advance_by(Duration::from_secs(5));
        assert_eq!(scheduler.now() - start, Duration::from_secs(5));
        assert_eq!(scheduler.pending(), 0);
    }
}
