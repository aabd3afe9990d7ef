use crate::test::{run_failure, run_instructions};
use crate::*;

#[test]
fn jump_is_a_byte_address() {
    // Jumping over the PUTI avoids the underflow it would otherwise hit.
    let code = [
        instr!(JUMP, 16),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert!(output.is_empty());
}

#[test]
fn jump_target_out_of_range_is_fatal() {
    assert!(matches!(
        run_failure(&[instr!(JUMP, 800)], 0, ""),
        RuntimeError::PcOutOfRange(800)
    ));
}

fn branch(condition: u32) -> Vec<Instruction> {
    // 0: condition        4: then  (DSTORE 1; PUTI; halt)
    // 1: then target      7: else  (DSTORE 0; PUTI; halt)
    // 2: else target
    // 3: COND_JUMP
    vec![
        instr!(DSTORE, condition),
        instr!(DSTORE, 32),
        instr!(DSTORE, 56),
        eval_instr!(COND_JUMP),
        instr!(DSTORE, 1),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
        instr!(DSTORE, 0),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ]
}

#[test]
fn cond_jump_takes_then_target_when_non_zero() {
    let (machine, output) = run_instructions(&branch(1), 0, "");

    assert_eq!(output, b"1");
    assert!(machine.stack().is_empty());
}

#[test]
fn cond_jump_takes_else_target_when_zero() {
    let (_, output) = run_instructions(&branch(0), 0, "");

    assert_eq!(output, b"0");
}

#[test]
fn cond_jump_treats_any_non_zero_condition_as_true() {
    let (_, output) = run_instructions(&branch(0xFFFF_FFFF), 0, "");

    assert_eq!(output, b"1");
}

#[test]
fn cond_jump_needs_three_operands() {
    let code = [
        instr!(DSTORE, 8),
        instr!(DSTORE, 8),
        eval_instr!(COND_JUMP),
    ];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::StackUnderflow
    ));
}

#[test]
fn cond_jump_target_out_of_range_is_fatal() {
    let code = [
        instr!(DSTORE, 1),
        instr!(DSTORE, 4000),
        instr!(DSTORE, 4000),
        eval_instr!(COND_JUMP),
    ];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::PcOutOfRange(4000)
    ));
}

#[test]
fn cond_jump_rejects_negative_target() {
    // Condition 0 selects the else target, built as 0 - 8 = -8.
    let code = [
        instr!(DSTORE, 0),
        instr!(DSTORE, 8),
        instr!(DSTORE, 0),
        instr!(DSTORE, 8),
        eval_instr!(SUB),
        eval_instr!(COND_JUMP),
    ];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::PcOutOfRange(-8)
    ));
}
