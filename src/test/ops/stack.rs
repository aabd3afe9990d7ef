use crate::test::{run_failure, run_instructions};
use crate::*;

#[test]
fn dstore_dwrite_dload() {
    let (machine, _) = run_instructions(
        &[
            instr!(DSTORE, 42),
            instr!(DWRITE, 0),
            instr!(DLOAD, 0),
            instr!(DWRITE, 1),
            instr!(JUMP, constants::HALT_ADDRESS),
        ],
        2,
        "",
    );

    assert_eq!(machine.variables(), &[42, 42]);
}

#[test]
fn dstore_operand_is_unsigned() {
    let (machine, _) = run_instructions(
        &[
            instr!(DSTORE, 0xFFFF_FFFE),
            instr!(JUMP, constants::HALT_ADDRESS),
        ],
        0,
        "",
    );

    assert_eq!(machine.stack(), &[4_294_967_294]);
}

#[test]
fn dwrite_truncates_to_32_bits() {
    let (machine, _) = run_instructions(
        &[
            instr!(DSTORE, 0xFFFF_FFFE),
            instr!(DWRITE, 0),
            instr!(JUMP, constants::HALT_ADDRESS),
        ],
        1,
        "",
    );

    assert_eq!(machine.variables(), &[-2]);
}

#[test]
fn dload_sign_extends() {
    let (machine, _) = run_instructions(
        &[
            instr!(DSTORE, 0xFFFF_FFFF),
            instr!(DWRITE, 0),
            instr!(DLOAD, 0),
            instr!(JUMP, constants::HALT_ADDRESS),
        ],
        1,
        "",
    );

    assert_eq!(machine.stack(), &[-1]);
}

#[test]
fn variables_start_zeroed() {
    let (machine, _) = run_instructions(
        &[instr!(DLOAD, 2), instr!(JUMP, constants::HALT_ADDRESS)],
        3,
        "",
    );

    assert_eq!(machine.stack(), &[0]);
    assert_eq!(machine.variables(), &[0, 0, 0]);
}

#[test]
fn nop_has_no_effect() {
    let (machine, output) = run_instructions(
        &[
            instr!(NOP),
            instr!(DSTORE, 5),
            instr!(NOP),
            instr!(JUMP, constants::HALT_ADDRESS),
        ],
        0,
        "",
    );

    assert!(output.is_empty());
    assert_eq!(machine.stack(), &[5]);
}

#[test]
fn dwrite_underflows_on_empty_stack() {
    assert!(matches!(
        run_failure(&[instr!(DWRITE, 0)], 1, ""),
        RuntimeError::StackUnderflow
    ));
}

#[test]
fn dload_rejects_bad_index() {
    assert!(matches!(
        run_failure(&[instr!(DLOAD, 3)], 1, ""),
        RuntimeError::VariableOutOfRange(3)
    ));
}

#[test]
fn dwrite_rejects_bad_index() {
    assert!(matches!(
        run_failure(&[instr!(DSTORE, 1), instr!(DWRITE, 1)], 1, ""),
        RuntimeError::VariableOutOfRange(1)
    ));
}
