use sbm_core::{ModelKind, ProposalKind};
use sbm_mcmc::{CoolingSchedule, RunConfig, RunMode};
use tempfile::tempdir;

#[test]
fn empty_document_yields_defaults() {
    let config = RunConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, RunConfig::default());
    assert_eq!(
        config.mode,
        RunMode::Marginalize {
            burn_in: 1000,
            sample_every: 10,
            samples: 1000,
        }
    );
    assert_eq!(config.proposal, ProposalKind::Swap);
    assert_eq!(config.model, ModelKind::Sbm);
    config.validate().unwrap();
}

#[test]
fn maximize_mode_parses_tagged_schedule() {
    let yaml = "\
mode:
  type: maximize
  duration: 500
  schedule:
    type: linear
    t0: 600.0
    eta: 1.0
proposal: single-vertex
model: ppm
randomize: true
seed_policy:
  master_seed: 7
  label: nightly
";
    let config = RunConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(
        config.mode,
        RunMode::Maximize {
            duration: 500,
            schedule: CoolingSchedule::Linear { t0: 600.0, eta: 1.0 },
        }
    );
    assert_eq!(config.proposal, ProposalKind::SingleVertex);
    assert_eq!(config.model, ModelKind::Ppm);
    assert!(config.randomize);
    assert_eq!(config.seed_policy.master_seed, 7);
    assert_eq!(config.seed_policy.label.as_deref(), Some("nightly"));
    config.validate().unwrap();
}

#[test]
fn maximize_defaults_to_exponential_cooling() {
    let config = RunConfig::from_yaml_str("mode:\n  type: maximize\n").unwrap();
    assert_eq!(
        config.mode,
        RunMode::Maximize {
            duration: 1000,
            schedule: CoolingSchedule::default(),
        }
    );
}

#[test]
fn validation_flags_bad_parameters() {
    let mut config = RunConfig::default();
    config.mode = RunMode::Marginalize {
        burn_in: 0,
        sample_every: 0,
        samples: 10,
    };
    assert_eq!(config.validate().unwrap_err().code(), "invalid-sample-every");

    config.mode = RunMode::Marginalize {
        burn_in: 0,
        sample_every: usize::MAX,
        samples: 2,
    };
    assert_eq!(config.validate().unwrap_err().code(), "sample-count-overflow");

    config.mode = RunMode::Maximize {
        duration: 100,
        schedule: CoolingSchedule::Exponential { t0: 1.0, alpha: 1.5 },
    };
    assert_eq!(
        config.validate().unwrap_err().code(),
        "invalid-schedule-parameter"
    );
}

#[test]
fn unknown_modes_fail_to_parse() {
    let err = RunConfig::from_yaml_str("mode:\n  type: optimize\n").unwrap_err();
    assert_eq!(err.code(), "config-parse");
}

#[test]
fn yaml_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.yaml");
    let mut config = RunConfig::default();
    config.mode = RunMode::Maximize {
        duration: 250,
        schedule: CoolingSchedule::Logarithmic { c: 2.0, d: 1.0 },
    };
    config.record_trajectory = true;
    std::fs::write(&path, config.to_yaml_string().unwrap()).unwrap();

    let loaded = RunConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let missing = RunConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(missing.code(), "config-read");
}
