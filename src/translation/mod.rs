/*!
 * Translation engine.
 *
 * This module contains everything between the raw endpoint and the
 * application controller. It is split into several submodules:
 *
 * - `core`: Translation client and request sequencing
 * - `rate_limit`: Fixed-window request quota
 * - `memory`: Translation memory and glossary
 * - `batch`: Sequential batch processing and export
 * - `alternatives`: Primary and chunked alternative translations
 * - `detection`: Script detection and confidence heuristics
 * - `quality`: Heuristic quality scoring
 * - `pronunciation`: Substitution-based pronunciation guides
 */

// Re-export main types for easier usage
pub use self::alternatives::{Alternative, AlternativeMethod, generate_alternatives};
pub use self::batch::{BatchItem, BatchStatus, BatchTranslator, ExportFormat};
pub use self::core::{RequestSequencer, TranslationService};
pub use self::detection::{Detection, Script};
pub use self::memory::{GlossaryEntry, MemoryEntry, TranslationMemory};
pub use self::pronunciation::generate_pronunciation;
pub use self::quality::{QualityScore, score_translation};
pub use self::rate_limit::RateLimiter;

// Submodules
pub mod alternatives;
pub mod batch;
pub mod core;
pub mod detection;
pub mod memory;
pub mod pronunciation;
pub mod quality;
pub mod rate_limit;
