//! End-to-end pet-care scenarios against the registry and vault.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use cryptopet_pets::{PetError, PetRegistry, PetRules};
use cryptopet_types::{AccountId, Mood, PetAction, PetInfo, PetStatus, Wei};
use cryptopet_vault::{RewardSchedule, RewardVault, SolvencyResult};

const MINUTE: u64 = 60;
const HOUR: u64 = 3_600;
const FEE: Wei = 10_000_000_000_000_000;

fn account(raw: &str) -> AccountId {
    AccountId::parse(raw).unwrap()
}

#[test]
fn adopt_rex_and_read_back() {
    let mut registry = PetRegistry::new(PetRules::default());
    let mut vault = RewardVault::new(RewardSchedule::default());
    let alice = account("0xalice");

    assert!(!registry.has_pet(&alice));
    registry.adopt_pet(&mut vault, &alice, "Rex", FEE, 0).unwrap();
    assert!(registry.has_pet(&alice));

    assert_eq!(
        registry.get_pet_info(&alice).unwrap(),
        PetInfo {
            name: String::from("Rex"),
            created_at: 0,
            total_rewards: 0,
        }
    );
    assert_eq!(
        registry.get_current_status(&alice, 0).unwrap(),
        PetStatus {
            happiness: 100,
            energy: 100,
            mood: Mood::Excellent,
        }
    );
    assert!(matches!(
        registry.adopt_pet(&mut vault, &alice, "Rex", FEE, 1),
        Err(PetError::AlreadyOwnsPet(_))
    ));
}

#[test]
fn early_feed_rejected_then_accepted() {
    let mut registry = PetRegistry::default();
    let mut vault = RewardVault::new(RewardSchedule::default());
    let alice = account("0xalice");
    registry.adopt_pet(&mut vault, &alice, "Rex", FEE, 0).unwrap();

    let early = registry.feed_pet(&mut vault, &alice, 30 * MINUTE);
    assert_eq!(
        early.unwrap_err(),
        PetError::CooldownActive {
            action: PetAction::Feed,
            remaining_secs: 30 * MINUTE,
        }
    );

    let before = registry.get_current_status(&alice, 61 * MINUTE).unwrap();
    let receipt = registry.feed_pet(&mut vault, &alice, 61 * MINUTE).unwrap();
    assert!(receipt.energy >= before.energy);
    assert!(receipt.happiness >= before.happiness);
    assert!(receipt.energy <= 100 && receipt.happiness <= 100);
    assert_eq!(
        registry.get(&alice).map(|p| p.last_feed_time),
        Some(61 * MINUTE)
    );
}

#[test]
fn over_demanded_vault_pays_exactly_its_funding() {
    let funding: Wei = 2_500_000_000_000_000;
    let rules = PetRules {
        adoption_fee: 0,
        ..PetRules::default()
    };
    let mut registry = PetRegistry::new(rules);
    let mut vault = RewardVault::new(RewardSchedule::default());
    vault.fund(&account("0xdeployer"), funding, 0).unwrap();

    let owners: Vec<AccountId> = ["0xa", "0xb", "0xc"].iter().map(|a| account(a)).collect();
    for owner in &owners {
        registry.adopt_pet(&mut vault, owner, "Pet", 0, 0).unwrap();
    }

    let mut paid: Wei = 0;
    for round in 1..=4_u64 {
        for owner in &owners {
            let receipt = registry.feed_pet(&mut vault, owner, round * HOUR).unwrap();
            paid += receipt.reward;
        }
    }

    assert_eq!(paid, funding);
    assert_eq!(vault.balance(), 0);
    assert_eq!(vault.verify_solvency(), SolvencyResult::Solvent);

    let rewarded: Wei = registry.pets().map(|p| p.total_rewards).sum();
    assert_eq!(rewarded, vault.total_disbursed());
}
