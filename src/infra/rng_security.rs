//! Commit-reveal схема для run-it-twice.
//!
//! До прогонов движок публикует только хэш секрета (commit), после –
//! сам секрет (reveal). Любой клиент может пересчитать всю цепочку
//! seed'ов и убедиться, что борды не были подобраны задним числом:
//!
//!   public_seed = SHA256(secret)
//!   initial     = SHA256(secret || player_entropy || timestamp)
//!   seed(i)     = SHA256^(i+1)(initial)   // i-й прогон
//!
//! player_entropy собирается из внешнего мира (клиентские байты),
//! чтобы ни одна сторона не контролировала seed целиком.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng_seed::RngSeed;

/// Входы генерации seed'ов. `secret_seed` хранится до вскрытия
/// только на стороне движка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedGeneration {
    pub secret_seed: [u8; 32],
    pub timestamp: u64,
    pub player_entropy: Vec<u8>,
}

/// Публичная часть: commit, цепочка seed'ов по прогонам и,
/// после вскрытия, сам секрет (proof).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedVerification {
    /// SHA256(secret_seed) – публикуется до прогонов.
    pub public_seed: [u8; 32],
    /// seed каждого прогона: i-я итерация SHA256 от initial.
    pub hash_chain: Vec<[u8; 32]>,
    /// Секрет, вскрытый после прогонов. None до шоудауна.
    pub proof: Option<[u8; 32]>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSecurity {
    pub seed_generation: SeedGeneration,
    pub verification: SeedVerification,
}

/// Итог проверки: совпало/нет плюс пересчитанная цепочка,
/// чтобы клиент мог показать расхождение.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationReport {
    pub ok: bool,
    pub computed_chain: Vec<[u8; 32]>,
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

fn initial_seed(secret: &[u8; 32], player_entropy: &[u8], timestamp: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(player_entropy);
    hasher.update(timestamp.to_le_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

fn build_chain(initial: [u8; 32], runs: u8) -> Vec<[u8; 32]> {
    let mut chain = Vec::with_capacity(runs as usize);
    let mut current = initial;
    for _ in 0..runs {
        current = sha256(&current);
        chain.push(current);
    }
    chain
}

/// Сгенерировать commit-reveal состояние для `runs` прогонов.
///
/// `secret` приходит снаружи (криптослучайные 32 байта), `timestamp` –
/// момент генерации от транспорта. Proof сразу заполнен: движок
/// вскрывает его вместе с результатами прогонов.
pub fn generate_rng_security(
    secret: [u8; 32],
    player_entropy: &[u8],
    timestamp: u64,
    runs: u8,
) -> RngSecurity {
    let initial = initial_seed(&secret, player_entropy, timestamp);

    RngSecurity {
        seed_generation: SeedGeneration {
            secret_seed: secret,
            timestamp,
            player_entropy: player_entropy.to_vec(),
        },
        verification: SeedVerification {
            public_seed: sha256(&secret),
            hash_chain: build_chain(initial, runs),
            proof: Some(secret),
        },
    }
}

impl RngSecurity {
    /// Seed i-го прогона (0-based).
    pub fn run_seed(&self, run_index: usize) -> Option<RngSeed> {
        self.verification
            .hash_chain
            .get(run_index)
            .map(|bytes| RngSeed::from_bytes(*bytes))
    }
}

/// Проверка честности: пересчитать commit и цепочку из proof.
///
/// Никогда не возвращает ошибку. Если proof ещё не вскрыт,
/// проверять нечего – отчёт тривиально ok с пустой цепочкой.
pub fn verify_rng_security(security: &RngSecurity) -> VerificationReport {
    let proof = match security.verification.proof {
        Some(p) => p,
        None => {
            return VerificationReport {
                ok: true,
                computed_chain: Vec::new(),
            }
        }
    };

    if sha256(&proof) != security.verification.public_seed {
        return VerificationReport {
            ok: false,
            computed_chain: Vec::new(),
        };
    }

    let initial = initial_seed(
        &proof,
        &security.seed_generation.player_entropy,
        security.seed_generation.timestamp,
    );
    let computed = build_chain(initial, security.verification.hash_chain.len() as u8);
    let ok = computed == security.verification.hash_chain;

    VerificationReport {
        ok,
        computed_chain: computed,
    }
}
