//! Инфраструктурный слой вокруг покерного движка:
//! - RNG-реализации для движка;
//! - commit-reveal схема для run-it-twice;
//! - абстракция хранения результатов (off-chain / тесты).

pub mod persistence;
pub mod rng;
pub mod rng_security;
pub mod rng_seed;

pub use persistence::*;
pub use rng::*;
pub use rng_security::{
    generate_rng_security, verify_rng_security, RngSecurity, SeedGeneration, SeedVerification,
    VerificationReport,
};
pub use rng_seed::RngSeed;
