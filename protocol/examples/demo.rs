// Veil Ledger: confidential transfer walkthrough
//
// Runs one private transfer end to end on a single machine: key generation
// for three parties, encrypted amounts, the format and balance proofs a
// validator checks and the sender's signature over them, a same-value
// proof for an auditor, and what happens when someone tampers with the
// bytes.
//
//   cargo run --example demo
//   RUST_LOG=veil_ledger=debug cargo run --example demo

use std::time::Instant;

use anyhow::{ensure, Context};
use rand::rngs::OsRng;

use veil_ledger::logging::{init_logging, LogFormat};
use veil_ledger::{
    decrypt_value, encrypt_value, generate_keys, prove_balance, prove_format, prove_same_value,
    sign, verify_balance_proof, verify_commitment, verify_format_proof, verify_same_value,
    verify_signature, BalanceCommitments, BalanceProof, CurveContext, CypherText, FormatProof,
    KeyRecord, PublicKey, Signature,
};

// ---------------------------------------------------------------------------
// Terminal Colors
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";
const RED: &str = "\x1b[31m";
const BG_BLUE: &str = "\x1b[44m";

// ---------------------------------------------------------------------------
// Display Helpers
// ---------------------------------------------------------------------------

fn banner() {
    println!();
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}     VEIL LEDGER  -  Confidential Transfer Walkthrough              {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}     BN254 G1 | Pedersen | dual-point ElGamal | sigma proofs        {RESET}"
    );
    println!(
        "{BG_BLUE}{BOLD}{WHITE}                                                                    {RESET}"
    );
    println!();
}

fn section(num: u32, title: &str) {
    println!();
    println!(
        "{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]=============================================================={RESET}"
    );
    println!("{BOLD}{WHITE}  {title}{RESET}");
    println!(
        "{CYAN}------------------------------------------------------------------------{RESET}"
    );
}

fn subsection(text: &str) {
    println!("{DIM}{CYAN}  >> {text}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn rejected(text: &str) {
    println!("{RED}  [REJECTED] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}{MAGENTA}  [{label}: {ms:.2} ms]{RESET}");
}

/// Short fingerprint of a public key: the first and last bytes of G1.
fn key_display(name: &str, public: &PublicKey, color: &str) {
    let g1 = public.g1.to_hex();
    println!(
        "  {color}{BOLD}{name}{RESET}  {DIM}G1 {}...{}{RESET}",
        &g1[..8],
        &g1[g1.len() - 8..]
    );
}

fn ciphertext_hex(ct: &CypherText) -> String {
    hex::encode(ct.to_bytes())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    init_logging("warn", LogFormat::Pretty)?;
    let demo_start = Instant::now();
    let ctx = CurveContext::bn254();
    let mut rng = OsRng;

    banner();

    // -----------------------------------------------------------------------
    // Step 1: Keys
    // -----------------------------------------------------------------------

    section(1, "Key Generation");
    subsection("Deriving (G1, G2, H) for Alice, Bob and the auditor...");

    let t = Instant::now();
    let (alice, alice_priv) = generate_keys(&ctx, "alice", &mut rng)?;
    let (bob, bob_priv) = generate_keys(&ctx, "bob", &mut rng)?;
    let (auditor, _) = generate_keys(&ctx, "auditor", &mut rng)?;
    timing("keygen x3", t.elapsed());

    println!();
    key_display("Alice   ", &alice, BLUE);
    key_display("Bob     ", &bob, GREEN);
    key_display("Auditor ", &auditor, MAGENTA);

    let wire = bob.to_wire(&ctx).to_bytes();
    info("Public key on the wire", &format!("{} bytes", wire.len()));
    success("Three key pairs derived from their seed strings");

    // -----------------------------------------------------------------------
    // Step 2: Encrypted amounts
    // -----------------------------------------------------------------------

    section(2, "Encrypting the Transfer");
    subsection("Alice spends 100, sends 70 to Bob and keeps 30 as change...");

    let t = Instant::now();
    let (ct_spent, cm_spent, _) = encrypt_value(&alice, 100, &mut rng)?;
    let (ct_sent, cm_sent, r_sent) = encrypt_value(&bob, 70, &mut rng)?;
    let (ct_change, cm_change, _) = encrypt_value(&alice, 30, &mut rng)?;
    let (_, cm_audit, _) = encrypt_value(&auditor, 70, &mut rng)?;
    timing("encrypt x4", t.elapsed());

    ensure!(verify_commitment(&bob, &cm_sent), "Bob's commitment must open");
    info("Ciphertext to Bob", &format!("{}...", &ciphertext_hex(&ct_sent)[..32]));
    success("Commitments open to the amounts they claim");

    // -----------------------------------------------------------------------
    // Step 3: Validator checks
    // -----------------------------------------------------------------------

    section(3, "Proofs a Validator Checks");
    subsection("Format proof: Bob's ciphertext really encrypts 70...");

    let t = Instant::now();
    let format = prove_format(&bob, 70, &r_sent, &ct_sent, &mut rng)?;
    timing("format prove", t.elapsed());
    let format_bytes = format.to_bytes();

    let t = Instant::now();
    let received = FormatProof::from_bytes(&format_bytes)?;
    let ct_received = CypherText::from_bytes(&ct_sent.to_bytes())?;
    ensure!(
        verify_format_proof(&bob, 70, &ct_received, &received),
        "format proof must verify"
    );
    timing("format verify", t.elapsed());
    info("Format proof", &format!("{} bytes", format_bytes.len()));
    success("Format proof verified from bytes alone");

    subsection("Balance proof: spent = sent + returned, amounts hidden...");
    let commitments = BalanceCommitments {
        spent: cm_spent.point,
        sent: cm_sent.point,
        returned: cm_change.point,
    };

    let t = Instant::now();
    let balance = prove_balance(&commitments, 100, 70, 30, &mut rng)?;
    timing("balance prove", t.elapsed());
    let balance_bytes = balance.to_bytes();

    let t = Instant::now();
    let received = BalanceProof::from_bytes(&balance_bytes)?;
    ensure!(
        verify_balance_proof(&commitments, &received),
        "balance proof must verify"
    );
    timing("balance verify", t.elapsed());
    info("Balance proof", &format!("{} bytes", balance_bytes.len()));
    success("100 = 70 + 30 proven without revealing any of the three");

    subsection("Alice signs the proof bundle with the same key pair...");
    let mut bundle = format_bytes.clone();
    bundle.extend_from_slice(&balance_bytes);
    let signature = sign(&alice_priv, &bundle, &mut rng)?;
    let received = Signature::from_bytes(&signature.to_bytes())?;
    ensure!(
        verify_signature(&alice, &bundle, &received),
        "bundle signature must verify"
    );
    ensure!(
        !verify_signature(&bob, &bundle, &received),
        "signature must not verify under another key"
    );
    success("Bundle signature verified against Alice's H");

    // -----------------------------------------------------------------------
    // Step 4: Auditor
    // -----------------------------------------------------------------------

    section(4, "Auditor Disclosure");
    subsection("Same-value proof: Bob's and the auditor's commitments hold one amount...");

    let t = Instant::now();
    let same = prove_same_value((&bob, &cm_sent), (&auditor, &cm_audit), 70, &mut rng)?;
    ensure!(
        verify_same_value((&bob, &cm_sent), (&auditor, &cm_audit), &same),
        "same-value proof must verify"
    );
    timing("same-value prove + verify", t.elapsed());
    success("Auditor's copy provably matches what Bob received");

    // -----------------------------------------------------------------------
    // Step 5: Tampering
    // -----------------------------------------------------------------------

    section(5, "Tampering");

    subsection("Flipping one bit in the format proof's response...");
    let mut tampered = format_bytes.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;
    let accepted = FormatProof::from_bytes(&tampered)
        .map(|p| verify_format_proof(&bob, 70, &ct_sent, &p))
        .unwrap_or(false);
    ensure!(!accepted, "tampered format proof must be rejected");
    rejected("Tampered format proof");

    subsection("Claiming Bob received 71 instead of 70...");
    ensure!(
        !verify_format_proof(&bob, 71, &ct_sent, &format),
        "wrong amount must be rejected"
    );
    rejected("Format proof against the wrong amount");

    subsection("Inflating the transfer: spent 100, sent 80, returned 30...");
    let (_, cm_inflated, _) = encrypt_value(&bob, 80, &mut rng)?;
    let inflated = BalanceCommitments {
        sent: cm_inflated.point,
        ..commitments
    };
    let bogus = prove_balance(&inflated, 100, 80, 30, &mut rng)?;
    ensure!(
        !verify_balance_proof(&inflated, &bogus),
        "unbalanced transfer must be rejected"
    );
    rejected("Balance proof for 100 != 80 + 30");

    // -----------------------------------------------------------------------
    // Step 6: Decryption
    // -----------------------------------------------------------------------

    section(6, "Decryption");
    subsection("Each party recovers only what was encrypted to them...");

    let t = Instant::now();
    let received = decrypt_value(&bob_priv, &ct_sent)?;
    let change = decrypt_value(&alice_priv, &ct_change)?;
    let spent = decrypt_value(&alice_priv, &ct_spent)?;
    timing("decrypt x3", t.elapsed());

    info("Bob received", &received.to_string());
    info("Alice's change", &change.to_string());
    info("Alice spent", &spent.to_string());
    ensure!(received == 70 && change == 30 && spent == 100, "amounts must round-trip");
    success("All amounts recovered by bounded search");

    // -----------------------------------------------------------------------
    // Step 7: Key export
    // -----------------------------------------------------------------------

    section(7, "Key Export");
    subsection("Exporting Bob's key as JSON and loading it back...");

    let json = KeyRecord::from_private_key(&ctx, &bob_priv).to_json();
    let reloaded = KeyRecord::from_json(&json)?
        .to_private_key(&ctx)
        .context("reloading Bob's key")?;
    ensure!(
        decrypt_value(&reloaded, &ct_sent)? == 70,
        "reloaded key must decrypt"
    );
    info("Key record", &format!("{} bytes of JSON", json.len()));
    success("Reloaded key decrypts the same ciphertext");

    println!();
    println!(
        "{BOLD}{GREEN}  Walkthrough complete in {:.2} s{RESET}",
        demo_start.elapsed().as_secs_f64()
    );
    println!();

    Ok(())
}
