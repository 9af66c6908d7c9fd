//! Intersection statistics collected per benchmark case.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use prettytable::{cell, Row, Table};

use crate::float::*;
use crate::intersect::Ray;

// Helper trait to print out Float type used
trait FloatName {
    fn float_name() -> String;
}

impl FloatName for f32 {
    fn float_name() -> String {
        "f32".to_string()
    }
}

impl FloatName for f64 {
    fn float_name() -> String {
        "f64".to_string()
    }
}

lazy_static::lazy_static! {
    static ref STATS: Mutex<Statistics> = Mutex::new(Statistics::new());
}

macro_rules! stats {
    () => {
        STATS.lock().unwrap()
    };
}

macro_rules! current_case {
    () => {
        stats!().current().unwrap()
    };
}

pub fn print_and_save(path: &Path) {
    let table = stats!().table();
    table.printstd();
    let mut stats_file = File::create(path).unwrap();
    table.print(&mut stats_file).unwrap();
}

pub fn new_case(name: &str) {
    stats!().new_case(name);
}

pub fn time(name: &str) -> TimerHandle {
    current_case!().start_timer(name)
}

fn stop_timer(name: &str) {
    current_case!().stop_timer(name);
}

pub fn start_trace() {
    let mut handle = time("Trace");
    Ray::reset_count();
    handle.deactivate();
}

pub fn stop_trace(n_objects: usize) {
    stop_timer("Trace");
    current_case!().ray_count = Ray::count();
    current_case!().n_objects = n_objects;
}

struct Statistics {
    case_stats: Vec<CaseStatistics>,
}

impl Statistics {
    fn new() -> Statistics {
        Statistics {
            case_stats: Vec::new(),
        }
    }

    fn new_case(&mut self, name: &str) {
        self.case_stats.push(CaseStatistics::new(name));
    }

    fn current(&mut self) -> Option<&mut CaseStatistics> {
        self.case_stats.iter_mut().last()
    }

    fn table(&self) -> Table {
        let mut names = vec![cell!(Float::float_name())];
        let mut timer_rows = Vec::new();
        let mut mrps = vec![cell!("Mrays/s")];
        let mut n_rays = vec![cell!("Rays")];
        let mut n_objects = vec![cell!("Objects")];
        for (timer, l) in &self.case_stats[0].timers {
            let mut row = Row::empty();
            row.add_cell(cell!(format!("{}{}", "| ".repeat(*l), timer.name)));
            timer_rows.push((&timer.name, row))
        }
        for stats in &self.case_stats {
            names.push(cell!(stats.case));
            mrps.push(cell!(stats.mrps()));
            n_rays.push(cell!(stats.ray_count));
            n_objects.push(cell!(stats.n_objects));
            for (name, row) in &mut timer_rows {
                let timer = stats.get_timer(name).unwrap();
                row.add_cell(cell!(timer.pretty_duration()));
            }
        }
        let mut table = Table::new();
        table.add_row(Row::new(names));
        table.add_row(Row::new(mrps));
        for (_, row) in timer_rows {
            table.add_row(row);
        }
        table.add_row(Row::new(n_rays));
        table.add_row(Row::new(n_objects));
        table
    }
}

struct CaseStatistics {
    case: String,
    timers: Vec<(Timer, usize)>,
    active_timers: Vec<usize>,
    ray_count: usize,
    n_objects: usize,
}

impl CaseStatistics {
    fn new(name: &str) -> CaseStatistics {
        CaseStatistics {
            case: name.to_string(),
            timers: Vec::new(),
            active_timers: Vec::new(),
            ray_count: 0,
            n_objects: 0,
        }
    }

    fn start_timer(&mut self, name: &str) -> TimerHandle {
        let timer = Timer::new(name);
        let handle = timer.handle();
        self.timers.push((timer, self.active_timers.len()));
        self.active_timers.push(self.timers.len() - 1);
        handle
    }

    fn stop_timer(&mut self, name: &str) {
        if let Some(i) = self.active_timers.pop() {
            let (timer, _) = &mut self.timers[i];
            if timer.name == name {
                timer.stop();
            } else {
                panic!("Timer '{}' not on top of timer stack", name);
            }
        } else {
            panic!(
                "Tried to stop timer '{}' when there are no active timers",
                name
            );
        }
    }

    fn get_timer(&self, name: &str) -> Option<&Timer> {
        for (timer, _) in &self.timers {
            if timer.name == name {
                return Some(timer);
            }
        }
        None
    }

    fn mrps(&self) -> String {
        let trace_timer = self.get_timer("Trace").unwrap();
        let trace_duration = trace_timer.duration.unwrap();
        let float_time = trace_duration.as_secs() as f64
            + f64::from(trace_duration.subsec_nanos()) / 1_000_000_000.0;
        let mrps = self.ray_count as f64 / float_time / 1_000_000.0;
        format!("{:#.2?}", mrps)
    }
}

#[derive(Clone, Debug)]
pub struct Timer {
    name: String,
    start: Instant,
    duration: Option<Duration>,
}

impl Timer {
    fn new(name: &str) -> Timer {
        Timer {
            name: name.to_string(),
            start: Instant::now(),
            duration: None,
        }
    }

    fn stop(&mut self) {
        assert!(
            self.duration.is_none(),
            "Tried to stop already stopped timer!"
        );
        self.duration = Some(self.start.elapsed());
    }

    fn pretty_duration(&self) -> String {
        if let Some(duration) = &self.duration {
            format!("{:#.2?}", duration)
        } else {
            format!("{:#.2?}", self.start.elapsed())
        }
    }

    fn handle(&self) -> TimerHandle {
        TimerHandle {
            name: self.name.clone(),
            active: true,
        }
    }
}

pub struct TimerHandle {
    name: String,
    active: bool,
}

impl TimerHandle {
    pub fn stop(&mut self) {
        stop_timer(&self.name);
        self.deactivate();
    }

    // Prevent handle from stopping the timer when dropped
    fn deactivate(&mut self) {
        self.active = false;
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if self.active {
            self.stop()
        }
    }
}
