//! Per-athlete performance prediction.
//!
//! Each athlete gets an independent model mapping `(distance_km, load)` to the
//! expected session duration in minutes. Nothing is pooled across athletes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::forest::RandomForest;
use super::types::{MlError, MlResult, ModelKind, TrainingSample};
use crate::config::PredictorSettings;

/// A trained model for one athlete.
#[derive(Debug, Clone)]
pub enum AthleteModel {
    /// Forest trained on two or more sessions.
    Forest(RandomForest),
    /// Only one session is known; its actual duration is the answer.
    SingleSession {
        /// The lone session's actual duration
        duration_min: f64,
    },
}

impl AthleteModel {
    /// Which kind of model this is.
    pub fn kind(&self) -> ModelKind {
        match self {
            AthleteModel::Forest(_) => ModelKind::Forest,
            AthleteModel::SingleSession { .. } => ModelKind::SingleSession,
        }
    }

    fn predict(&self, distance_km: f64, load: f64) -> MlResult<f64> {
        match self {
            AthleteModel::Forest(forest) => forest.predict(&[distance_km, load]),
            AthleteModel::SingleSession { duration_min } => Ok(*duration_min),
        }
    }
}

/// A model plus what the dashboard needs to pre-fill queries.
#[derive(Debug, Clone)]
struct FittedAthlete {
    model: AthleteModel,
    mean_load: f64,
    samples: usize,
}

/// A predictor question for one athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionQuery {
    /// Athlete identifier
    pub athlete: String,
    /// Planned distance (km)
    pub distance_km: f64,
    /// Planned load
    pub load: f64,
}

/// A predicted duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Athlete identifier
    pub athlete: String,
    /// Queried distance (km)
    pub distance_km: f64,
    /// Queried load
    pub load: f64,
    /// Predicted duration in minutes
    pub duration_min: f64,
    /// Model that produced the value
    pub model: ModelKind,
}

/// Per-athlete duration predictor.
#[derive(Debug, Clone)]
pub struct PerformancePredictor {
    settings: PredictorSettings,
    models: BTreeMap<String, FittedAthlete>,
}

impl PerformancePredictor {
    /// Create an empty predictor.
    pub fn new(settings: PredictorSettings) -> Self {
        Self {
            settings,
            models: BTreeMap::new(),
        }
    }

    /// Train one athlete's model, replacing any previous one.
    ///
    /// Rows with non-finite values are skipped. With no usable rows the athlete
    /// gets no model.
    pub fn fit_athlete(&mut self, athlete: &str, samples: &[TrainingSample]) -> MlResult<ModelKind> {
        let usable: Vec<&TrainingSample> = samples.iter().filter(|s| s.is_finite()).collect();
        if usable.len() < samples.len() {
            tracing::warn!(
                "Skipping {} non-numeric training rows for {}",
                samples.len() - usable.len(),
                athlete
            );
        }

        if usable.is_empty() {
            self.models.remove(athlete);
            return Err(MlError::InsufficientData {
                message: format!("No usable sessions for {}", athlete),
                guidance: "Record at least one session with distance, load and time.".into(),
            });
        }

        let mean_load = usable.iter().map(|s| s.load).sum::<f64>() / usable.len() as f64;

        let model = if usable.len() == 1 {
            tracing::debug!("{} has a single session, prediction is that session's time", athlete);
            AthleteModel::SingleSession {
                duration_min: usable[0].actual_duration_min,
            }
        } else {
            let features: Vec<Vec<f64>> = usable.iter().map(|s| s.features()).collect();
            let targets: Vec<f64> = usable.iter().map(|s| s.actual_duration_min).collect();

            let mut forest = RandomForest::new(2, self.settings.forest_config());
            forest.fit(&features, &targets)?;
            tracing::debug!(
                "Fitted {}-tree forest for {} on {} sessions",
                forest.len(),
                athlete,
                usable.len()
            );
            AthleteModel::Forest(forest)
        };

        let kind = model.kind();
        self.models.insert(
            athlete.to_string(),
            FittedAthlete {
                model,
                mean_load,
                samples: usable.len(),
            },
        );
        Ok(kind)
    }

    /// Predict the duration of a hypothetical session.
    pub fn predict(&self, athlete: &str, distance_km: f64, load: f64) -> MlResult<f64> {
        self.validate_query(distance_km, load)?;
        let fitted = self
            .models
            .get(athlete)
            .ok_or_else(|| MlError::UnknownAthlete(athlete.to_string()))?;
        fitted.model.predict(distance_km, load)
    }

    /// Answer a query, keeping the inputs alongside the result.
    pub fn answer(&self, query: &PredictionQuery) -> MlResult<Prediction> {
        let duration_min = self.predict(&query.athlete, query.distance_km, query.load)?;
        let model = self
            .model_kind(&query.athlete)
            .ok_or_else(|| MlError::UnknownAthlete(query.athlete.clone()))?;

        Ok(Prediction {
            athlete: query.athlete.clone(),
            distance_km: query.distance_km,
            load: query.load,
            duration_min,
            model,
        })
    }

    /// Query pre-filled with the default distance and the athlete's mean load.
    pub fn default_query(&self, athlete: &str) -> MlResult<PredictionQuery> {
        let fitted = self
            .models
            .get(athlete)
            .ok_or_else(|| MlError::UnknownAthlete(athlete.to_string()))?;

        Ok(PredictionQuery {
            athlete: athlete.to_string(),
            distance_km: self.settings.default_distance_km,
            load: fitted.mean_load,
        })
    }

    /// Athletes with a trained model, sorted.
    pub fn athletes(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Trained model for an athlete.
    pub fn model(&self, athlete: &str) -> Option<&AthleteModel> {
        self.models.get(athlete).map(|f| &f.model)
    }

    /// Kind of model trained for an athlete.
    pub fn model_kind(&self, athlete: &str) -> Option<ModelKind> {
        self.model(athlete).map(AthleteModel::kind)
    }

    /// Number of sessions an athlete's model was trained on.
    pub fn training_size(&self, athlete: &str) -> Option<usize> {
        self.models.get(athlete).map(|f| f.samples)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    fn validate_query(&self, distance_km: f64, load: f64) -> MlResult<()> {
        if !distance_km.is_finite() || distance_km < self.settings.min_distance_km {
            return Err(MlError::InvalidQuery(format!(
                "Distance must be at least {} km, got {}",
                self.settings.min_distance_km, distance_km
            )));
        }
        if !load.is_finite() || load < 0.0 {
            return Err(MlError::InvalidQuery(format!(
                "Load must be non-negative, got {}",
                load
            )));
        }
        Ok(())
    }
}

impl Default for PerformancePredictor {
    fn default() -> Self {
        Self::new(PredictorSettings::default())
    }
}
