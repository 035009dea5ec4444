// ─────────────────────────────────────────────────────────────────────
// CRFlux — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{FluxError, FluxResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Selection of a primary flux model and its published sub-variant.
///
/// JSON form: `{"model": "HillasGaisser2012", "variant": "H3a"}`.
/// Sub-variant strings are validated when the model is built, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum ModelConfig {
    PolyGonato {
        /// Use per-nucleus spectral change (gamma_c + index) instead of a global one.
        #[serde(default)]
        constdelta: bool,
    },
    HillasGaisser2012 {
        #[serde(default = "default_hg_variant")]
        variant: String,
    },
    /// Hillas-Gaisser with poly-gonato-like first population.
    H3aPolygonato {
        #[serde(default = "default_h3a")]
        variant: String,
    },
    GaisserStanevTilav {
        #[serde(default = "default_gst_variant")]
        variant: String,
        /// Count the Te and Hg groups in the supported set.
        #[serde(default)]
        include_heavy_in_total: bool,
    },
    #[serde(rename = "CombinedGHandHG")]
    CombinedGhAndHg {
        #[serde(default = "default_h3a")]
        variant: String,
    },
    ZatsepinSokolskaya {
        #[serde(default = "default_zs_variant")]
        variant: String,
    },
    GaisserHonda,
    Thunman,
    SimplePowerlaw27,
    GlobalSplineFitBeta {
        /// Resolved spline table path. Directory discovery is the caller's job.
        spline_path: PathBuf,
    },
}

fn default_hg_variant() -> String {
    "H4a".to_string()
}
fn default_h3a() -> String {
    "H3a".to_string()
}
fn default_gst_variant() -> String {
    "3-gen".to_string()
}
fn default_zs_variant() -> String {
    "pamela".to_string()
}

impl ModelConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> FluxResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Build from a model family name and an optional option string,
    /// e.g. `("GaisserStanevTilav", Some("4-gen"))`.
    pub fn from_name(model: &str, option: Option<&str>) -> FluxResult<Self> {
        let unsupported = |opt: &str| FluxError::UnsupportedModelConfiguration {
            model: model.to_string(),
            option: opt.to_string(),
        };
        let variant_or = |default: fn() -> String| option.map_or_else(default, str::to_string);

        let config = match model {
            "PolyGonato" => {
                let constdelta = match option {
                    None | Some("false") => false,
                    Some("true") | Some("constdelta") => true,
                    Some(other) => return Err(unsupported(other)),
                };
                ModelConfig::PolyGonato { constdelta }
            }
            "HillasGaisser2012" => ModelConfig::HillasGaisser2012 {
                variant: variant_or(default_hg_variant),
            },
            "H3aPolygonato" => ModelConfig::H3aPolygonato {
                variant: variant_or(default_h3a),
            },
            "GaisserStanevTilav" => ModelConfig::GaisserStanevTilav {
                variant: variant_or(default_gst_variant),
                include_heavy_in_total: false,
            },
            "CombinedGHandHG" => ModelConfig::CombinedGhAndHg {
                variant: variant_or(default_h3a),
            },
            "ZatsepinSokolskaya" => ModelConfig::ZatsepinSokolskaya {
                variant: variant_or(default_zs_variant),
            },
            "GaisserHonda" => ModelConfig::GaisserHonda,
            "Thunman" => ModelConfig::Thunman,
            "SimplePowerlaw27" => ModelConfig::SimplePowerlaw27,
            "GlobalSplineFitBeta" => match option {
                Some(path) => ModelConfig::GlobalSplineFitBeta {
                    spline_path: PathBuf::from(path),
                },
                None => return Err(unsupported("<missing spline path>")),
            },
            _ => return Err(unsupported(option.unwrap_or(""))),
        };
        Ok(config)
    }

    /// Set the GST `include_heavy_in_total` flag. Requesting the heavy
    /// groups for any other family is an unsupported configuration.
    pub fn with_heavy_in_total(mut self, include: bool) -> FluxResult<Self> {
        if let ModelConfig::GaisserStanevTilav {
            include_heavy_in_total,
            ..
        } = &mut self
        {
            *include_heavy_in_total = include;
        } else if include {
            return Err(FluxError::UnsupportedModelConfiguration {
                model: self.family().to_string(),
                option: "include_heavy_in_total".to_string(),
            });
        }
        Ok(self)
    }

    /// Family name as used in JSON and by [`ModelConfig::from_name`].
    pub fn family(&self) -> &'static str {
        match self {
            ModelConfig::PolyGonato { .. } => "PolyGonato",
            ModelConfig::HillasGaisser2012 { .. } => "HillasGaisser2012",
            ModelConfig::H3aPolygonato { .. } => "H3aPolygonato",
            ModelConfig::GaisserStanevTilav { .. } => "GaisserStanevTilav",
            ModelConfig::CombinedGhAndHg { .. } => "CombinedGHandHG",
            ModelConfig::ZatsepinSokolskaya { .. } => "ZatsepinSokolskaya",
            ModelConfig::GaisserHonda => "GaisserHonda",
            ModelConfig::Thunman => "Thunman",
            ModelConfig::SimplePowerlaw27 => "SimplePowerlaw27",
            ModelConfig::GlobalSplineFitBeta { .. } => "GlobalSplineFitBeta",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn test_parse_tagged_json() {
        let cfg: ModelConfig =
            serde_json::from_str(r#"{"model": "HillasGaisser2012", "variant": "H3a"}"#).unwrap();
        assert_eq!(
            cfg,
            ModelConfig::HillasGaisser2012 {
                variant: "H3a".to_string()
            }
        );
    }

    #[test]
    fn test_defaults_applied() {
        let cfg: ModelConfig = serde_json::from_str(r#"{"model": "GaisserStanevTilav"}"#).unwrap();
        assert_eq!(
            cfg,
            ModelConfig::GaisserStanevTilav {
                variant: "3-gen".to_string(),
                include_heavy_in_total: false,
            }
        );

        let cfg: ModelConfig = serde_json::from_str(r#"{"model": "PolyGonato"}"#).unwrap();
        assert_eq!(cfg, ModelConfig::PolyGonato { constdelta: false });

        let cfg: ModelConfig = serde_json::from_str(r#"{"model": "CombinedGHandHG"}"#).unwrap();
        assert_eq!(
            cfg,
            ModelConfig::CombinedGhAndHg {
                variant: "H3a".to_string()
            }
        );
    }

    #[test]
    fn test_unit_variants() {
        let cfg: ModelConfig = serde_json::from_str(r#"{"model": "Thunman"}"#).unwrap();
        assert_eq!(cfg, ModelConfig::Thunman);
    }

    #[test]
    fn test_from_name() {
        let cfg = ModelConfig::from_name("ZatsepinSokolskaya", Some("default")).unwrap();
        assert_eq!(
            cfg,
            ModelConfig::ZatsepinSokolskaya {
                variant: "default".to_string()
            }
        );
        let cfg = ModelConfig::from_name("PolyGonato", Some("true")).unwrap();
        assert_eq!(cfg, ModelConfig::PolyGonato { constdelta: true });
    }

    #[test]
    fn test_heavy_groups_flag() {
        let cfg = ModelConfig::from_name("GaisserStanevTilav", Some("4-gen"))
            .unwrap()
            .with_heavy_in_total(true)
            .unwrap();
        assert_eq!(
            cfg,
            ModelConfig::GaisserStanevTilav {
                variant: "4-gen".to_string(),
                include_heavy_in_total: true,
            }
        );
        assert_eq!(cfg.family(), "GaisserStanevTilav");

        let hg = ModelConfig::from_name("HillasGaisser2012", None).unwrap();
        assert_eq!(hg.clone().with_heavy_in_total(false).unwrap(), hg);
        assert!(matches!(
            hg.with_heavy_in_total(true),
            Err(FluxError::UnsupportedModelConfiguration { .. })
        ));
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        assert!(matches!(
            ModelConfig::from_name("Nonexistent", None),
            Err(FluxError::UnsupportedModelConfiguration { .. })
        ));
        assert!(ModelConfig::from_name("PolyGonato", Some("maybe")).is_err());
        assert!(ModelConfig::from_name("GlobalSplineFitBeta", None).is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let cfg = ModelConfig::GaisserStanevTilav {
            variant: "4-gen".to_string(),
            include_heavy_in_total: true,
        };
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "crflux_model_config_{}_{}.json",
            std::process::id(),
            epoch_ns
        ));
        std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

        let loaded = ModelConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, cfg);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            ModelConfig::from_file("/nonexistent/crflux.json"),
            Err(FluxError::Io(_))
        ));
    }
}
