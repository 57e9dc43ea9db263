use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};

use chrono::NaiveDateTime;

use crate::{
    alarm::{self, AlarmConfig},
    notify::Notifier,
};

const COLUMN_WIDTHS: [usize; 4] = [15, 11, 15, 9];
const COLUMN_HEADERS: [&str; 4] = ["Current Time", "Alarm Time", "Sound", "Status"];

fn table_border() -> String {
    let cells: Vec<String> = COLUMN_WIDTHS
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect();
    format!("+{}+", cells.join("+"))
}

fn table_row(values: &[&str; 4]) -> String {
    let cells: Vec<String> = values
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(value, width)| format!(" {value:^width$} "))
        .collect();
    format!("|{}|", cells.join("|"))
}

/// poll the injected clock until the alarm time comes up, then ring
///
/// WAITING -> RINGING, exiting on cancellation or (one-shot mode) after one
/// ring. the status row is redrawn in place once per poll. polling slower
/// than once a second can miss the matching second, that is left alone on
/// purpose
pub fn run_alarm_loop(
    config: &AlarmConfig,
    poll_interval: Duration,
    ring_interval: Duration,
    clock: impl Fn() -> NaiveDateTime,
    notifier: &Notifier,
    stop: &AtomicBool,
) {
    let border = table_border();
    println!();
    println!("{border}");
    println!("{}", table_row(&COLUMN_HEADERS));
    println!("{border}");

    let alarm_label = config.time.to_string();
    let sound_label = config.sound.file_name().map_or_else(
        || config.sound.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    );

    while !stop.load(Ordering::Relaxed) {
        let now = clock();
        let ringing = alarm::should_trigger(now, config.time);
        let status = if ringing { "RINGING" } else { "WAITING" };
        let row = table_row(&[&alarm::format_time(now), &alarm_label, &sound_label, status]);
        print!("\r{row}");
        let _ = io::stdout().flush();

        if ringing {
            // close the table under the ringing row before the alert line
            println!("\n{border}");
            println!("\nWake Up!");
            log::info!("alarm triggered at {}", alarm::format_time(now));
            notifier.ring(&config.sound, config.repeat, ring_interval, stop);
            if !config.repeat {
                break;
            }
        }

        if stop.load(Ordering::Relaxed) {
            break;
        }
        thread::sleep(poll_interval);
    }
}
