use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;

use crate::{
    alarm::{self, AlarmConfig, AlarmError, AlarmTime},
    config::Config,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Simple alarm clock that triggers at a specified time.", long_about = None)]
pub struct Args {
    /// Alarm time in HH:MM:SS AM/PM format.
    #[clap(long)]
    pub time: Option<String>,
    /// Path to the alarm sound file. Defaults to alarm.wav in the current folder.
    #[clap(long)]
    pub sound: Option<PathBuf>,
    /// Ring only once instead of looping until stopped.
    #[clap(long)]
    pub once: bool,
    /// Polling interval in seconds.
    #[clap(long)]
    pub poll: Option<f64>,
    /// Interval between rings in seconds when repeating.
    #[clap(long)]
    pub ring_interval: Option<f64>,
    /// Read defaults from an alternate config file.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// everything the loop needs, after flags and file defaults are merged
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub alarm: AlarmConfig,
    pub poll_interval: Duration,
    pub ring_interval: Duration,
}

impl Args {
    /// the alarm time string to parse: the flag wins, then the file default
    #[must_use]
    pub fn alarm_input(&self, defaults: &Config) -> Option<String> {
        self.time.clone().or_else(|| defaults.alarm_time.clone())
    }

    /// merge flags over file defaults into one runnable settings bundle
    ///
    /// # Errors
    /// fails if either interval is negative or not a number
    pub fn into_settings(
        self,
        defaults: &Config,
        time: AlarmTime,
        base_dir: &Path,
    ) -> Result<Settings, AlarmError> {
        let sound = self.sound.unwrap_or_else(|| defaults.sound.clone());
        let poll = self.poll.unwrap_or(defaults.poll_interval);
        let ring = self.ring_interval.unwrap_or(defaults.ring_interval);
        Ok(Settings {
            alarm: AlarmConfig {
                time,
                sound: alarm::resolve_sound_path(&sound, base_dir),
                repeat: !self.once,
            },
            poll_interval: interval("poll interval", poll)?,
            ring_interval: interval("ring interval", ring)?,
        })
    }
}

fn interval(name: &'static str, value: f64) -> Result<Duration, AlarmError> {
    if value.is_finite() && value >= 0.0 {
        Ok(Duration::from_secs_f64(value))
    } else {
        Err(AlarmError::InvalidInterval { name, value })
    }
}

/// show the current time and read an alarm time off stdin, like when no
/// `--time` flag was given
///
/// # Errors
/// fails if stdin or stdout is closed
pub fn prompt_alarm_time() -> io::Result<String> {
    println!(
        "\nCurrent Time: {}",
        alarm::format_time(chrono::Local::now().naive_local())
    );
    print!("\n\t..:: Enter the time of alarm to be set (HH:MM:SS AM/PM) ==> ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
