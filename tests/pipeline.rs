use rand::SeedableRng;
use rand::rngs::StdRng;
use sinelab::{
    Controller, FilterChoice, FilterKernel, LabConfig, LabError, Message, NoiseParams, NoiseTrace,
    Parameter, SignalGenerator, SignalParams, TimeGrid, filter,
};

fn lab_grid() -> TimeGrid {
    TimeGrid::linspace(0.0, 10.0, 1000).unwrap()
}

#[test]
fn test_generate_then_filter() {
    let generator = SignalGenerator::new(lab_grid());
    let noise = NoiseTrace::draw(generator.len(), &mut StdRng::seed_from_u64(5));
    let params = SignalParams::default();

    let signal = generator.generate(&params, &noise).unwrap();
    let smoothed = filter(
        &signal,
        FilterKernel::Gaussian {
            window_size: 51,
            sigma: 8.0,
        },
    )
    .unwrap();
    let clean = generator.clean(&params).unwrap();

    assert_eq!(smoothed.len(), signal.len());

    // Away from the edges, smoothing pulls the noisy wave back toward the clean one
    let error = |s: &[f64]| -> f64 {
        s[100..900]
            .iter()
            .zip(&clean.samples()[100..900])
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    };
    assert!(error(smoothed.samples()) < error(signal.samples()));
}

#[test]
fn test_noise_free_scenario() {
    let generator = SignalGenerator::new(lab_grid());
    let params = SignalParams {
        amplitude: 1.0,
        frequency: 1.0,
        phase: 0.5,
        noise: NoiseParams::new(0.0, 0.0),
        show_noise: true,
    };
    let noise = NoiseTrace::draw(generator.len(), &mut StdRng::seed_from_u64(6));
    let signal = generator.generate(&params, &noise).unwrap();
    assert!((signal[0] - 0.4794).abs() < 1e-4);
    assert_eq!(signal, generator.clean(&params).unwrap());
}

#[test]
fn test_controller_session() {
    let mut controller = Controller::new(LabConfig {
        seed: Some(2024),
        ..LabConfig::default()
    })
    .unwrap();

    let messages = [
        Message::SelectFilter(FilterChoice::Gaussian),
        Message::ParameterChanged(Parameter::WindowSize, 21.0),
        Message::ParameterChanged(Parameter::Sigma, 4.0),
        Message::ParameterChanged(Parameter::Amplitude, 3.0),
        Message::RegenerateNoise,
        Message::ToggleNoise(false),
    ];
    let mut last = None;
    for message in messages {
        last = Some(controller.dispatch(message).unwrap());
    }

    let frame = last.unwrap();
    assert_eq!(frame.time.len(), 1000);
    assert_eq!(frame.filtered.len(), frame.signal.len());
    assert!((frame.signal[0] - 3.0 * 0.5_f64.sin()).abs() < 1e-12);
    assert!(frame.filtered.peak() <= frame.signal.peak() + 1e-9);
}

#[test]
fn test_same_seed_same_session() {
    let run = || {
        let mut controller = Controller::new(LabConfig {
            seed: Some(77),
            ..LabConfig::default()
        })
        .unwrap();
        controller.dispatch(Message::RegenerateNoise).unwrap();
        controller
            .dispatch(Message::ParameterChanged(Parameter::NoiseMean, 0.3))
            .unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_unknown_filter_name_is_rejected() {
    let parsed = "median".parse::<FilterChoice>();
    assert!(matches!(parsed, Err(LabError::InvalidParameter { .. })));
}

#[test]
fn test_window_must_fit_grid() {
    let config = LabConfig::from_json_str(
        r#"{
            "grid": { "start": 0.0, "end": 1.0, "points": 64 },
            "initial": { "window_size": 5, "filter": "uniform" },
            "seed": 1
        }"#,
    )
    .unwrap();
    let mut controller = Controller::new(config).unwrap();
    let result = controller.dispatch(Message::ParameterChanged(Parameter::WindowSize, 99.0));
    assert!(matches!(
        result,
        Err(LabError::InvalidParameter {
            name: "window_size",
            ..
        })
    ));
    assert_eq!(controller.state().window_size, 5);
}
