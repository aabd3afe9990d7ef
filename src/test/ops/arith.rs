use crate::test::{run_failure, run_instructions};
use crate::*;

fn top_of_stack(code: &[Instruction]) -> i64 {
    let mut with_halt = code.to_vec();
    with_halt.push(instr!(JUMP, constants::HALT_ADDRESS));

    let (machine, _) = run_instructions(&with_halt, 0, "");
    *machine.stack().last().unwrap()
}

// Builds `0 - value` on the stack, the only way bytecode literals can
// produce a negative operand.
fn negative(value: u32) -> Vec<Instruction> {
    vec![instr!(DSTORE, 0), instr!(DSTORE, value), eval_instr!(SUB)]
}

#[test]
fn add_keeps_full_precision() {
    let code = [
        instr!(DSTORE, 1 << 30),
        instr!(DSTORE, 1 << 30),
        eval_instr!(ADD),
    ];

    assert_eq!(top_of_stack(&code), 1 << 31);
}

#[test]
fn add_then_mod_does_not_truncate_early() {
    let code = [
        instr!(DSTORE, 1 << 30),
        instr!(DSTORE, 1 << 30),
        eval_instr!(ADD),
        instr!(DSTORE, 7),
        eval_instr!(MOD),
    ];

    assert_eq!(top_of_stack(&code), 2);
}

#[test]
fn mul_keeps_full_precision() {
    let code = [
        instr!(DSTORE, 1 << 16),
        instr!(DSTORE, 1 << 16),
        eval_instr!(MUL),
    ];

    assert_eq!(top_of_stack(&code), 1 << 32);
}

#[test]
fn sub_truncates() {
    let code = [
        instr!(DSTORE, 0),
        instr!(DSTORE, 0xFFFF_FFFF),
        eval_instr!(SUB),
    ];

    // 0 - 4294967295 wraps to 1 in 32 bits.
    assert_eq!(top_of_stack(&code), 1);
}

#[test]
fn sub_produces_negatives() {
    assert_eq!(top_of_stack(&negative(7)), -7);
}

#[test]
fn div_floors_toward_negative_infinity() {
    let mut code = negative(7);
    code.push(instr!(DSTORE, 2));
    code.push(eval_instr!(DIV));

    assert_eq!(top_of_stack(&code), -4);
}

#[test]
fn div_floors_with_negative_divisor() {
    let mut code = vec![instr!(DSTORE, 7)];
    code.extend(negative(2));
    code.push(eval_instr!(DIV));

    assert_eq!(top_of_stack(&code), -4);
}

#[test]
fn div_truncates_min_by_negative_one() {
    let mut code = negative(0x8000_0000);
    code.extend(negative(1));
    code.push(eval_instr!(DIV));

    assert_eq!(top_of_stack(&code), -2_147_483_648);
}

#[test]
fn div_by_zero_is_fatal() {
    let code = [instr!(DSTORE, 1), instr!(DSTORE, 0), eval_instr!(DIV)];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::DivisionByZero
    ));
}

#[test]
fn mod_is_non_negative_for_positive_divisor() {
    let mut code = negative(7);
    code.push(instr!(DSTORE, 3));
    code.push(eval_instr!(MOD));

    assert_eq!(top_of_stack(&code), 2);
}

#[test]
fn mod_sign_follows_negative_divisor() {
    let mut code = vec![instr!(DSTORE, 7)];
    code.extend(negative(3));
    code.push(eval_instr!(MOD));

    assert_eq!(top_of_stack(&code), -2);
}

#[test]
fn mod_by_zero_is_fatal() {
    let code = [instr!(DSTORE, 1), instr!(DSTORE, 0), eval_instr!(MOD)];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::ModulusByZero
    ));
}

#[test]
fn comparisons() {
    let cases: [(EvalOp, u32, u32, i64); 12] = [
        (EvalOp::GT, 3, 2, 1),
        (EvalOp::GT, 2, 3, 0),
        (EvalOp::LT, 2, 3, 1),
        (EvalOp::LT, 3, 2, 0),
        (EvalOp::GE, 3, 3, 1),
        (EvalOp::GE, 2, 3, 0),
        (EvalOp::LE, 3, 3, 1),
        (EvalOp::LE, 3, 2, 0),
        (EvalOp::EQ, 4, 4, 1),
        (EvalOp::EQ, 4, 5, 0),
        (EvalOp::NE, 4, 5, 1),
        (EvalOp::NE, 4, 4, 0),
    ];

    for &(op, left, right, expected) in &cases {
        let code = [
            instr!(DSTORE, left),
            instr!(DSTORE, right),
            Instruction::eval(op),
        ];

        assert_eq!(top_of_stack(&code), expected, "{:?} {} {}", op, left, right);
    }
}

#[test]
fn binary_op_underflows_with_one_operand() {
    let code = [instr!(DSTORE, 1), eval_instr!(ADD)];

    assert!(matches!(
        run_failure(&code, 0, ""),
        RuntimeError::StackUnderflow
    ));
}
