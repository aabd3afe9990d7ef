use crate::test::{run_failure, run_instructions};
use crate::*;

#[test]
fn geti_reads_signed_decimals() {
    let code = [
        instr!(GETI),
        instr!(PUTI),
        instr!(GETI),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "12 -7");
    assert_eq!(output, b"12-7");
}

#[test]
fn geti_skips_non_numeric_tokens() {
    let code = [
        instr!(GETI),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "abc 9");
    assert_eq!(output, b"9");
}

#[test]
fn geti_yields_zero_at_end_of_input() {
    let code = [
        instr!(GETI),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert_eq!(output, b"0");
}

#[test]
fn getc_reads_bytes() {
    let code = [
        instr!(GETC),
        instr!(PUTC),
        instr!(GETC),
        instr!(PUTC),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "ab");
    assert_eq!(output, b"ab");
}

#[test]
fn getc_yields_zero_at_end_of_input() {
    let code = [instr!(GETC), instr!(JUMP, constants::HALT_ADDRESS)];

    let (machine, _) = run_instructions(&code, 0, "");
    assert_eq!(machine.stack(), &[0]);
}

#[test]
fn puti_prints_the_truncated_value() {
    let code = [
        instr!(DSTORE, 0xFFFF_FFFF),
        instr!(PUTI),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert_eq!(output, b"-1");
}

#[test]
fn putc_prints_ascii() {
    let code = [
        instr!(DSTORE, 104),
        instr!(PUTC),
        instr!(DSTORE, 105),
        instr!(PUTC),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert_eq!(output, b"hi");
}

#[test]
fn putc_suppresses_values_above_127() {
    let code = [
        instr!(DSTORE, 200),
        instr!(PUTC),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert!(output.is_empty());
}

#[test]
fn putc_suppresses_negative_values() {
    let code = [
        instr!(DSTORE, 0),
        instr!(DSTORE, 1),
        eval_instr!(SUB),
        instr!(PUTC),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert!(output.is_empty());
}

#[test]
fn putc_gates_on_the_truncated_value() {
    // 2^32 + 65 truncates to 65 ('A') only at PUTC.
    let code = [
        instr!(DSTORE, 1 << 16),
        instr!(DSTORE, 1 << 16),
        eval_instr!(MUL),
        instr!(DSTORE, 65),
        eval_instr!(ADD),
        instr!(PUTC),
        instr!(JUMP, constants::HALT_ADDRESS),
    ];

    let (_, output) = run_instructions(&code, 0, "");
    assert_eq!(output, b"A");
}

#[test]
fn puti_underflows_on_empty_stack() {
    assert!(matches!(
        run_failure(&[instr!(PUTI)], 0, ""),
        RuntimeError::StackUnderflow
    ));
}
