//! Proposal toggles consulted while decoding.
//!
//! A [`Features`] value is part of every decode [`Context`](crate::Context);
//! two sessions with different feature sets can run side by side.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A WebAssembly proposal that gates some opcodes or encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Simd,
    Exceptions,
    TailCall,
    MultiValue,
    ReferenceTypes,
    BulkMemory,
    SignExtension,
    SaturatingFloatToInt,
    Threads,
}

impl Feature {
    pub const ALL: [Feature; 9] = [
        Feature::Simd,
        Feature::Exceptions,
        Feature::TailCall,
        Feature::MultiValue,
        Feature::ReferenceTypes,
        Feature::BulkMemory,
        Feature::SignExtension,
        Feature::SaturatingFloatToInt,
        Feature::Threads,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Simd => "simd",
            Feature::Exceptions => "exceptions",
            Feature::TailCall => "tail-call",
            Feature::MultiValue => "multi-value",
            Feature::ReferenceTypes => "reference-types",
            Feature::BulkMemory => "bulk-memory",
            Feature::SignExtension => "sign-extension",
            Feature::SaturatingFloatToInt => "saturating-float-to-int",
            Feature::Threads => "threads",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown feature `{0}`")]
pub struct UnknownFeatureError(pub String);

impl FromStr for Feature {
    type Err = UnknownFeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownFeatureError(s.to_owned()))
    }
}

/// The set of enabled proposals. The default is the MVP with nothing enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    bits: u16,
}

impl Features {
    pub fn mvp() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Feature::ALL.into_iter().fold(Self::mvp(), Self::with)
    }

    pub fn with(mut self, feature: Feature) -> Self {
        self.enable(feature);
        self
    }

    pub fn enable(&mut self, feature: Feature) {
        self.bits |= feature.bit();
    }

    pub fn disable(&mut self, feature: Feature) {
        self.bits &= !feature.bit();
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.bits & feature.bit() != 0
    }
}

impl FromIterator<Feature> for Features {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().fold(Self::mvp(), Self::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_independent() {
        let mut features = Features::mvp().with(Feature::Simd);
        features.enable(Feature::TailCall);
        features.disable(Feature::Simd);

        assert!(features.is_enabled(Feature::TailCall));
        assert!(!features.is_enabled(Feature::Simd));
        assert!(!features.is_enabled(Feature::BulkMemory));
    }

    #[test]
    fn all_enables_every_feature() {
        let all = Features::all();
        assert!(Feature::ALL.iter().all(|&f| all.is_enabled(f)));
        assert_eq!(Feature::ALL.into_iter().collect::<Features>(), all);
    }

    #[test]
    fn parses_kebab_case_names() {
        assert_eq!(
            "reference-types".parse::<Feature>().unwrap(),
            Feature::ReferenceTypes
        );
        for f in Feature::ALL {
            assert_eq!(f.to_string().parse::<Feature>().unwrap(), f);
        }
        assert!("gc".parse::<Feature>().is_err());
    }
}
