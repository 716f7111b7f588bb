use parking_lot::Mutex;
use serde::Deserialize;
use std::{fs, path::Path};
use tch::{kind::Kind, CModule, Device, IValue};

use crate::error::{LoadError, PredictError};
use crate::record::{FeatureRow, FeatureValue, FEATURE_COLUMNS};

/// Anything that turns one feature row into a range estimate in km.
///
/// Implementations are treated as opaque: no clamping or sanity checks are
/// applied to what they return.
pub trait RangePredictor: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError>;
}

#[derive(Deserialize)]
struct MetaJson {
    feat_list: Vec<String>,
    version: Option<String>,
}

/// Sidecar metadata exported next to the TorchScript artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactMeta {
    pub feat_list: Vec<String>,
    pub version: Option<String>,
}

impl ArtifactMeta {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, LoadError> {
        let meta: MetaJson = serde_json::from_str(text).map_err(|source| LoadError::Meta {
            path: path.to_path_buf(),
            source,
        })?;

        if meta.feat_list.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            return Err(LoadError::FeatureMismatch {
                expected: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
                got: meta.feat_list,
            });
        }

        Ok(Self {
            feat_list: meta.feat_list,
            version: meta.version,
        })
    }

    pub fn read(path: &Path) -> Result<Self, LoadError> {
        let text = read_existing(path)?;
        Self::from_json(path, &text)
    }
}

fn read_existing(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Fitted pipeline exported as TorchScript. `forward` takes a
/// `Dict[str, Any]` of column -> value and returns the range.
pub struct TorchPipeline {
    // Module reentrancy is not guaranteed; predictions are serialised.
    module: Mutex<CModule>,
    pub meta: ArtifactMeta,
}

impl TorchPipeline {
    pub fn load(model_path: &Path, meta_path: &Path) -> Result<Self, LoadError> {
        let meta = ArtifactMeta::read(meta_path)?;

        if !model_path.exists() {
            return Err(LoadError::Missing(model_path.to_path_buf()));
        }
        let module =
            CModule::load_on_device(model_path, Device::Cpu).map_err(|e| LoadError::Torch {
                path: model_path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::info!(
            "loaded pipeline {} (version {}); feat_list[{}]: {:?}",
            model_path.display(),
            meta.version.as_deref().unwrap_or("unknown"),
            meta.feat_list.len(),
            &meta.feat_list
        );

        Ok(Self {
            module: Mutex::new(module),
            meta,
        })
    }
}

impl RangePredictor for TorchPipeline {
    fn predict(&self, row: &FeatureRow) -> Result<f64, PredictError> {
        let input = row_to_ivalue(row);
        let out = {
            let module = self.module.lock();
            tch::no_grad(|| module.forward_is(&[input]))
        }
        .map_err(|e| PredictError::Backend(e.to_string()))?;
        range_from_output(out)
    }
}

fn row_to_ivalue(row: &FeatureRow) -> IValue {
    let entries = row
        .iter()
        .map(|(name, value)| {
            let v = match value {
                FeatureValue::Text(s) => IValue::String(s.clone()),
                FeatureValue::Int(i) => IValue::Int(*i),
                FeatureValue::Float(f) => IValue::Double(*f),
            };
            (IValue::String(name.to_string()), v)
        })
        .collect();
    IValue::GenericDict(entries)
}

/// First element of whatever the module returned, read as f64.
fn range_from_output(out: IValue) -> Result<f64, PredictError> {
    match out {
        IValue::Tensor(t) => {
            if t.numel() == 0 {
                return Err(PredictError::EmptyOutput);
            }
            let flat = t.flatten(0, -1).to_kind(Kind::Double);
            Ok(flat.double_value(&[0]))
        }
        IValue::Double(v) => Ok(v),
        IValue::Int(v) => Ok(v as f64),
        IValue::Tuple(items) | IValue::GenericList(items) => match items.into_iter().next() {
            Some(first) => range_from_output(first),
            None => Err(PredictError::EmptyOutput),
        },
        IValue::DoubleList(values) => values.first().copied().ok_or(PredictError::EmptyOutput),
        _ => Err(PredictError::UnexpectedOutput),
    }
}

/// Run one prediction on a known-good record so an incompatible artifact
/// fails at startup rather than on the first request.
pub fn warm_up(predictor: &dyn RangePredictor, row: &FeatureRow) -> Result<f64, LoadError> {
    let km = predictor.predict(row).map_err(LoadError::WarmUp)?;
    tracing::info!("warmup forward ok ({km:.2} km)");
    Ok(km)
}
