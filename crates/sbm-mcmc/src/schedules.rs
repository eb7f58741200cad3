use sbm_core::errors::{ErrorInfo, SbmError};
use serde::{Deserialize, Serialize};

/// Temperature schedule for simulated annealing.
///
/// Step `t` of an annealing run is evaluated at `temperature(t)`. Schedules
/// must be checked with [`CoolingSchedule::validate`] against the run length
/// before use, which guarantees a strictly positive temperature at every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CoolingSchedule {
    /// `t0 · alpha^t`.
    Exponential {
        /// Initial temperature, positive.
        t0: f64,
        /// Cooling rate in `(0, 1)`.
        alpha: f64,
    },
    /// `t0 − eta · t`.
    Linear {
        /// Initial temperature, positive.
        t0: f64,
        /// Rate of decline in `(0, t0]`.
        eta: f64,
    },
    /// `c / ln(t + d)`.
    Logarithmic {
        /// Scale, positive.
        c: f64,
        /// Delay, at least 1.
        d: f64,
    },
    /// Fixed temperature.
    Constant {
        /// Temperature, positive.
        temperature: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Exponential {
            t0: 1.0,
            alpha: 0.99,
        }
    }
}

impl CoolingSchedule {
    /// Temperature at step `t`.
    pub fn temperature(&self, t: usize) -> f64 {
        let t = t as f64;
        match *self {
            CoolingSchedule::Exponential { t0, alpha } => t0 * alpha.powf(t),
            CoolingSchedule::Linear { t0, eta } => t0 - eta * t,
            CoolingSchedule::Logarithmic { c, d } => c / (t + d).ln(),
            CoolingSchedule::Constant { temperature } => temperature,
        }
    }

    /// Stable schedule name.
    pub fn name(&self) -> &'static str {
        match self {
            CoolingSchedule::Exponential { .. } => "exponential",
            CoolingSchedule::Linear { .. } => "linear",
            CoolingSchedule::Logarithmic { .. } => "logarithmic",
            CoolingSchedule::Constant { .. } => "constant",
        }
    }

    /// Parameters in positional order.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            CoolingSchedule::Exponential { t0, alpha } => vec![t0, alpha],
            CoolingSchedule::Linear { t0, eta } => vec![t0, eta],
            CoolingSchedule::Logarithmic { c, d } => vec![c, d],
            CoolingSchedule::Constant { temperature } => vec![temperature],
        }
    }

    /// Builds a schedule from its name and positional parameters.
    ///
    /// An empty parameter list selects the defaults: exponential `(1, 0.99)`,
    /// linear `(duration + 1, 1)`, logarithmic `(1, 1)` and constant `(1)`.
    /// The result is validated against `duration`.
    pub fn from_name(name: &str, params: &[f64], duration: usize) -> Result<Self, SbmError> {
        let schedule = match (name, params) {
            ("exponential", []) => CoolingSchedule::default(),
            ("exponential", &[t0, alpha]) => CoolingSchedule::Exponential { t0, alpha },
            ("linear", []) => CoolingSchedule::Linear {
                t0: duration as f64 + 1.0,
                eta: 1.0,
            },
            ("linear", &[t0, eta]) => CoolingSchedule::Linear { t0, eta },
            ("logarithmic", []) => CoolingSchedule::Logarithmic { c: 1.0, d: 1.0 },
            ("logarithmic", &[c, d]) => CoolingSchedule::Logarithmic { c, d },
            ("constant", []) => CoolingSchedule::Constant { temperature: 1.0 },
            ("constant", &[temperature]) => CoolingSchedule::Constant { temperature },
            ("exponential" | "linear" | "logarithmic" | "constant", _) => {
                return Err(SbmError::Schedule(
                    ErrorInfo::new("schedule-arity", "wrong number of schedule parameters")
                        .with_context("schedule", name)
                        .with_context("given", params.len())
                        .with_hint("exponential: T0 alpha | linear: T0 eta | logarithmic: c d | constant: T"),
                ))
            }
            _ => {
                return Err(SbmError::Schedule(
                    ErrorInfo::new("unknown-schedule", "unknown cooling schedule")
                        .with_context("schedule", name)
                        .with_hint("options are exponential, linear, logarithmic and constant"),
                ))
            }
        };
        schedule.validate(duration)?;
        Ok(schedule)
    }

    /// Checks the parameters and that every temperature of a run of
    /// `duration` steps is strictly positive.
    pub fn validate(&self, duration: usize) -> Result<(), SbmError> {
        match *self {
            CoolingSchedule::Exponential { t0, alpha } => {
                require_positive(self, "t0", t0)?;
                if !(alpha > 0.0 && alpha < 1.0) {
                    return Err(parameter_error(self, "alpha", alpha, "alpha must lie in ]0, 1["));
                }
            }
            CoolingSchedule::Linear { t0, eta } => {
                require_positive(self, "t0", t0)?;
                if !(eta > 0.0 && eta <= t0) {
                    return Err(parameter_error(self, "eta", eta, "eta must lie in ]0, T0]"));
                }
                if eta * duration as f64 > t0 {
                    return Err(SbmError::Schedule(
                        ErrorInfo::new(
                            "schedule-too-long",
                            "eta * duration must be smaller or equal to T0",
                        )
                        .with_context("t0", t0)
                        .with_context("eta", eta)
                        .with_context("duration", duration),
                    ));
                }
            }
            CoolingSchedule::Logarithmic { c, d } => {
                require_positive(self, "c", c)?;
                if !(d >= 1.0) {
                    return Err(parameter_error(self, "d", d, "d must be at least 1"));
                }
            }
            CoolingSchedule::Constant { temperature } => {
                require_positive(self, "temperature", temperature)?;
            }
        }
        // every schedule is non-increasing, so the last step is the coldest
        if duration > 0 {
            let last = self.temperature(duration - 1);
            if !(last > 0.0) {
                return Err(SbmError::Schedule(
                    ErrorInfo::new(
                        "non-positive-temperature",
                        "the schedule reaches a non-positive temperature",
                    )
                    .with_context("schedule", self.name())
                    .with_context("step", duration - 1)
                    .with_context("temperature", last),
                ));
            }
        }
        Ok(())
    }
}

fn require_positive(schedule: &CoolingSchedule, name: &str, value: f64) -> Result<(), SbmError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(parameter_error(
            schedule,
            name,
            value,
            "parameter must be greater than 0",
        ))
    }
}

fn parameter_error(schedule: &CoolingSchedule, name: &str, value: f64, message: &str) -> SbmError {
    SbmError::Schedule(
        ErrorInfo::new("invalid-schedule-parameter", message)
            .with_context("schedule", schedule.name())
            .with_context("parameter", name)
            .with_context("value", value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_temperatures() {
        let exp = CoolingSchedule::Exponential { t0: 2.0, alpha: 0.5 };
        assert_eq!(exp.temperature(0), 2.0);
        assert!((exp.temperature(3) - 0.25).abs() < 1e-12);

        let lin = CoolingSchedule::Linear { t0: 10.0, eta: 2.0 };
        assert_eq!(lin.temperature(4), 2.0);

        let log = CoolingSchedule::Logarithmic { c: 3.0, d: 2.0 };
        assert!((log.temperature(0) - 3.0 / 2f64.ln()).abs() < 1e-12);

        let constant = CoolingSchedule::Constant { temperature: 0.7 };
        assert_eq!(constant.temperature(12345), 0.7);
    }

    #[test]
    fn params_round_trip_through_names() {
        for schedule in [
            CoolingSchedule::Exponential { t0: 3.0, alpha: 0.9 },
            CoolingSchedule::Linear { t0: 50.0, eta: 0.5 },
            CoolingSchedule::Logarithmic { c: 2.0, d: 1.5 },
            CoolingSchedule::Constant { temperature: 4.0 },
        ] {
            let rebuilt = CoolingSchedule::from_name(schedule.name(), &schedule.params(), 10).unwrap();
            assert_eq!(rebuilt, schedule);
        }
    }
}
