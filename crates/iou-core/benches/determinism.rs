use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iou_core::{
    verify, Amount, Command, CommandWithSigners, Currency, IouState, LedgerTransaction, Party,
    UniqueIdentifier,
};

fn issue_transaction(signers: &[&Party]) -> LedgerTransaction {
    let alice = Party::from_name("Alice");
    let bob = Party::from_name("Bob");
    let amount = Amount::from_major(1, Currency::new("GBP").unwrap()).unwrap();
    let state = IouState::new(amount, alice, bob, UniqueIdentifier::from_uuid(uuid::Uuid::nil()));
    LedgerTransaction::new(
        vec![],
        vec![state],
        vec![CommandWithSigners::new(
            Command::Issue,
            signers.iter().map(|p| p.owning_key),
        )],
    )
}

fn bench_verify(c: &mut Criterion) {
    let alice = Party::from_name("Alice");
    let bob = Party::from_name("Bob");
    let mini_corp = Party::from_name("MiniCorp");

    let accepted = issue_transaction(&[&alice, &bob]);
    let rejected = issue_transaction(&[&bob, &mini_corp, &alice]);

    c.bench_function("verify_issue_accepted", |b| {
        b.iter(|| verify(black_box(&accepted)))
    });
    c.bench_function("verify_issue_rejected_signers", |b| {
        b.iter(|| verify(black_box(&rejected)))
    });
    c.bench_function("transaction_id", |b| b.iter(|| black_box(&accepted).id()));
}

criterion_group!(benches, bench_verify);
criterion_main!(benches);
