use ringtune::config::SearchConfig;
use ringtune::model::{PowerSample, SearchModel, SearchState, TuneCode};

/// Power profile from the RTL regression stimulus: flat floor of 10 with
/// triangular resonances of height 120 centered at codes 5 and 15.
fn reference_power(code: u8) -> u8 {
    let t = i32::from(code);
    let mut power = 10;
    for center in [5, 15] {
        let distance = (t - center).abs();
        if distance < 3 {
            power += (3 - distance) * 40;
        }
    }
    (power & 0xff) as u8
}

/// Deterministic byte sequence for oracle comparisons.
fn lcg_samples(mut state: u32, len: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(len);
    for _ in 0..len {
        state = state.wrapping_mul(1103515245).wrapping_add(12345);
        samples.push((state >> 24) as u8);
    }
    samples
}

/// Straight-line reference detector: strict local maxima over the
/// consumed sample sequence. The first and last consumed samples are
/// never candidates (the window needs a neighbor on both sides), and
/// the list caps at the hardware size.
fn expected_peaks(visited: &[u8], samples: &[u8]) -> Vec<(u8, u8)> {
    let mut peaks = Vec::new();
    for i in 1..samples.len().saturating_sub(1) {
        if samples[i] > samples[i - 1]
            && samples[i] > samples[i + 1]
            && peaks.len() < SearchModel::PEAK_CAPACITY
        {
            peaks.push((visited[i], samples[i]));
        }
    }
    peaks
}

/// Configure, start, and feed samples until the model leaves `Active` or
/// the samples run out. Returns the model and the codes actually visited.
fn run_replay(config: SearchConfig, samples: &[u8]) -> (SearchModel, Vec<u8>) {
    let mut model = SearchModel::new();
    model.configure(config);
    model.start();

    let mut visited = Vec::new();
    for &raw in samples {
        if model.state() != SearchState::Active {
            break;
        }
        visited.push(model.tune_code().raw());
        model.step(PowerSample::new(raw));
    }
    (model, visited)
}

fn model_peaks(model: &SearchModel) -> Vec<(u8, u8)> {
    model
        .peaks()
        .iter()
        .map(|p| (p.code.raw(), p.power.raw()))
        .collect()
}

#[test]
fn test_golden_twin_peak_sweep() {
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(20), 0);
    let samples: Vec<u8> = (0..=20).map(reference_power).collect();

    let (model, visited) = run_replay(config, &samples);

    assert_eq!(model.state(), SearchState::Done);
    assert_eq!(visited.len(), 21);
    assert_eq!(model_peaks(&model), vec![(5, 130), (15, 130)]);
}

#[test]
fn test_matches_reference_detector_on_pseudorandom_sweeps() {
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(220), 0);

    for seed in [1u32, 7, 42, 1234, 99999] {
        let samples = lcg_samples(seed, 255);
        let (model, visited) = run_replay(config, &samples);

        assert_eq!(model.state(), SearchState::Done, "seed {}", seed);
        assert_eq!(visited.len(), 221, "seed {}", seed);

        let expected = expected_peaks(&visited, &samples[..visited.len()]);
        assert_eq!(model_peaks(&model), expected, "seed {}", seed);
    }
}

#[test]
fn test_matches_reference_detector_with_stride() {
    // Stride 2 from 0 finishes past 250, visiting every even code.
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(250), 1);
    let samples = lcg_samples(0xA5A5, 200);

    let (model, visited) = run_replay(config, &samples);

    assert_eq!(model.state(), SearchState::Done);
    let expected_codes: Vec<u8> = (0..=125).map(|i| (i * 2) as u8).collect();
    assert_eq!(visited, expected_codes);

    let expected = expected_peaks(&visited, &samples[..visited.len()]);
    assert_eq!(model_peaks(&model), expected);
}

#[test]
fn test_peak_list_saturates_on_busy_profile() {
    // A pseudorandom profile this long has far more than eight strict
    // maxima; both the model and the reference cap at the list size.
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(200), 0);
    let samples = lcg_samples(3, 201);

    let (model, visited) = run_replay(config, &samples);

    assert_eq!(model.peaks().len(), SearchModel::PEAK_CAPACITY);
    let expected = expected_peaks(&visited, &samples[..visited.len()]);
    assert_eq!(model_peaks(&model), expected);
}

#[test]
fn test_interrupted_replay_keeps_partial_results() {
    // Fewer samples than the range needs: the sweep stays active and the
    // peaks found so far remain readable.
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(255), 0);
    let samples: Vec<u8> = (0..50).map(|i| if i % 4 == 2 { 200 } else { 10 }).collect();

    let (model, visited) = run_replay(config, &samples);

    assert_eq!(model.state(), SearchState::Active);
    assert_eq!(model.tune_code(), TuneCode::new(50));

    let expected = expected_peaks(&visited, &samples);
    assert_eq!(model_peaks(&model), expected);
    assert!(!model.peaks().is_empty());
}

#[test]
fn test_restart_discards_previous_run() {
    let config = SearchConfig::new(TuneCode::new(0), TuneCode::new(20), 0);
    let samples: Vec<u8> = (0..=20).map(reference_power).collect();

    let (mut model, _) = run_replay(config, &samples);
    assert_eq!(model.peaks().len(), 2);

    // A narrower restart over the flat tail sees no peaks at all.
    model.configure(SearchConfig::new(TuneCode::new(18), TuneCode::new(20), 0));
    model.start();
    assert_eq!(model.state(), SearchState::Active);
    assert!(model.peaks().is_empty());

    for &raw in &samples[18..=20] {
        model.step(PowerSample::new(raw));
    }
    assert_eq!(model.state(), SearchState::Done);
    assert!(model.peaks().is_empty());
}

#[test]
fn test_upper_range_sweep() {
    // The deployment configuration sweeps the upper half of the code
    // space at stride 1.
    let config = SearchConfig::new(TuneCode::new(140), TuneCode::new(254), 0);
    let samples: Vec<u8> = (140..=254)
        .map(|code| {
            let t = i32::from(code as u8);
            let distance = (t - 200).abs();
            if distance < 4 {
                (40 + (4 - distance) * 30) as u8
            } else {
                40
            }
        })
        .collect();

    let (model, visited) = run_replay(config, &samples);

    assert_eq!(model.state(), SearchState::Done);
    assert_eq!(visited[0], 140);
    assert_eq!(*visited.last().unwrap(), 254);
    assert_eq!(model_peaks(&model), vec![(200, 160)]);
}
