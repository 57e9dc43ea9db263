use std::{
    path::PathBuf,
    process::ExitCode,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use clap::Parser;
use rouse::{
    alarm,
    cli::{self, Args},
    config::Config,
    notify::Notifier,
    run,
};

fn main() -> ExitCode {
    // initialize the logger
    simple_file_logger::init_logger!("rouse").expect("couldn't initialize logger");

    let args = Args::parse();
    let defaults = Config::load_or_default(args.config.as_deref());

    let alarm_input = match args.alarm_input(&defaults) {
        Some(input) => input,
        None => match cli::prompt_alarm_time() {
            Ok(input) => input,
            Err(e) => {
                eprintln!("Error: couldn't read alarm time: {e}");
                return ExitCode::from(2);
            }
        },
    };

    let time = match alarm::parse_alarm_time(&alarm_input) {
        Ok(time) => time,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = match args.into_settings(&defaults, time, &base_dir) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if !settings.alarm.sound.exists() {
        eprintln!(
            "Warning: sound file not found at {}. Using a beep fallback.",
            settings.alarm.sound.display()
        );
    }

    println!("\n\n\t\t\t..:: Setting up alarm ::..\n");
    log::info!("alarm set for {}", settings.alarm.time);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .expect("couldn't set interrupt handler");
    }

    let notifier = Notifier::new();
    run::run_alarm_loop(
        &settings.alarm,
        settings.poll_interval,
        settings.ring_interval,
        || chrono::Local::now().naive_local(),
        &notifier,
        &stop,
    );

    if stop.load(Ordering::Relaxed) {
        println!("\n\n\t==> Alarm Stopped\n");
        log::info!("alarm stopped by interrupt");
    }
    ExitCode::SUCCESS
}
