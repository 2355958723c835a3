// Résumé scoring pipeline.
// Extractor → normalizer → {keyword extractor, semantic scorer} → aggregator.
// `pipeline::ScoringEngine` wires the stages; the status policy is applied by callers.

pub mod compatibility;
pub mod extractor;
pub mod keywords;
pub mod normalizer;
pub mod pipeline;
pub mod semantic;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;
