//! Interactive noisy-harmonic lab in the terminal.
//!
//! UP/DOWN pick a control, LEFT/RIGHT adjust it.
//! F cycles the filter, N toggles noise, R draws new noise, X resets.
//! Press Q or ESC to quit.
//!
//! An optional first argument names a JSON config file.

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use sinelab::{Controller, Frame, LabConfig, Message, Parameter, Signal};
use std::io::{Write, stdout};
use std::panic;
use std::time::Duration;

const PLOT_WIDTH: usize = 72;
const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Slider step for each control.
fn step(parameter: Parameter) -> f64 {
    match parameter {
        Parameter::Amplitude | Parameter::Frequency | Parameter::Phase => 0.1,
        Parameter::NoiseMean | Parameter::NoiseVariance => 0.05,
        Parameter::WindowSize => 2.0,
        Parameter::Sigma => 0.5,
    }
}

struct Lab {
    controller: Controller,
    frame: Frame,
    selected: usize,
    status: String,
}

impl Lab {
    fn new(config: LabConfig) -> Result<Self> {
        let controller = Controller::new(config)?;
        let frame = controller.render()?;
        Ok(Self {
            controller,
            frame,
            selected: 0,
            status: String::from("ready"),
        })
    }

    fn selected(&self) -> Parameter {
        Parameter::ALL[self.selected]
    }

    fn nudge(&mut self, direction: f64) {
        let parameter = self.selected();
        let bound = self.controller.config().bounds.bound(parameter);
        let current = self.controller.state().value(parameter);
        let mut value = bound.clamp(current + direction * step(parameter));
        if parameter == Parameter::WindowSize {
            value = value.round();
        } else {
            // Keep slider values on a tidy grid despite float drift
            value = (value * 1000.0).round() / 1000.0;
            value = bound.clamp(value);
        }
        self.send(Message::ParameterChanged(parameter, value));
    }

    fn send(&mut self, message: Message) {
        match self.controller.dispatch(message) {
            Ok(frame) => {
                self.frame = frame;
                self.status = format!("{message:?}");
            }
            Err(err) => self.status = format!("rejected: {err}"),
        }
    }

    fn draw(&self) -> Result<()> {
        let mut out = stdout();
        out.execute(Clear(ClearType::All))?;
        out.execute(crossterm::cursor::MoveTo(0, 0))?;

        let state = self.controller.state();
        write!(out, "Noisy harmonic\r\n{}\r\n", sparkline(&self.frame.signal))?;
        write!(
            out,
            "  mean {:+.3}  rms {:.3}  peak {:.3}\r\n\r\n",
            self.frame.signal.mean(),
            self.frame.signal.rms(),
            self.frame.signal.peak()
        )?;
        write!(
            out,
            "Filtered ({})\r\n{}\r\n",
            state.filter,
            sparkline(&self.frame.filtered)
        )?;
        write!(out, "  rms {:.3}\r\n\r\n", self.frame.filtered.rms())?;

        for (i, parameter) in Parameter::ALL.iter().enumerate() {
            let marker = if i == self.selected { '>' } else { ' ' };
            write!(
                out,
                "{marker} {:<15} {:>8.3}\r\n",
                parameter.name(),
                state.value(*parameter)
            )?;
        }
        write!(
            out,
            "  show noise      {}\r\n\r\n{}\r\n",
            state.signal.show_noise, self.status
        )?;
        write!(
            out,
            "UP/DOWN select  LEFT/RIGHT adjust  F filter  N noise  R new noise  X reset  Q quit"
        )?;
        out.flush()?;
        Ok(())
    }
}

/// Downsamples `signal` to `PLOT_WIDTH` columns of block characters.
fn sparkline(signal: &Signal) -> String {
    if signal.is_empty() {
        return String::new();
    }
    let samples = signal.samples();
    let peak = signal.peak().max(f64::EPSILON);
    let chunk = samples.len().div_ceil(PLOT_WIDTH);

    samples
        .chunks(chunk)
        .map(|c| {
            let mean = c.iter().sum::<f64>() / c.len() as f64;
            let level = (mean / peak + 1.0) / 2.0 * (BARS.len() - 1) as f64;
            BARS[level.round().clamp(0.0, (BARS.len() - 1) as f64) as usize]
        })
        .collect()
}

fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => LabConfig::from_json_file(path)?,
        None => LabConfig::default(),
    };
    let mut lab = Lab::new(config)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(crossterm::cursor::Hide)?;

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    lab.draw()?;
    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                KeyCode::Up => {
                    lab.selected = (lab.selected + Parameter::ALL.len() - 1) % Parameter::ALL.len();
                }
                KeyCode::Down => lab.selected = (lab.selected + 1) % Parameter::ALL.len(),
                KeyCode::Left => lab.nudge(-1.0),
                KeyCode::Right => lab.nudge(1.0),
                KeyCode::Char('f') => {
                    let next = lab.controller.state().filter.next();
                    lab.send(Message::SelectFilter(next));
                }
                KeyCode::Char('n') => {
                    let show = !lab.controller.state().signal.show_noise;
                    lab.send(Message::ToggleNoise(show));
                }
                KeyCode::Char('r') => lab.send(Message::RegenerateNoise),
                KeyCode::Char('x') => lab.send(Message::Reset),
                _ => continue,
            }
            lab.draw()?;
        }
    }

    cleanup_terminal();
    Ok(())
}
