//! # Execution Tests
//!
//! Per-instruction semantics, the `x0` invariant, memory wrapping, branch targets, the
//! halt sentinel and the cycle count.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rvgold_core::common::error::SimError;
use rvgold_core::config::Config;
use rvgold_core::core::CpuState;
use rvgold_core::isa::instruction::Instruction as I;
use rvgold_core::Simulator;

use crate::common::TestContext;
use crate::common::strategies::{instruction, x0_writer};

#[test]
fn add_and_sub_wrap() {
    let mut ctx = TestContext::new(&[I::add(3, 1, 2), I::sub(4, 0, 2)]);
    ctx.set_reg(1, u64::MAX);
    ctx.set_reg(2, 2);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(3), 1);
    assert_eq!(ctx.get_reg(4), u64::MAX - 1);
}

#[test]
fn and_or_are_bitwise() {
    let mut ctx = TestContext::new(&[I::and(3, 1, 2), I::or(4, 1, 2)]);
    ctx.set_reg(1, 0xF0F0);
    ctx.set_reg(2, 0x0FF0);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(3), 0x00F0);
    assert_eq!(ctx.get_reg(4), 0xFFF0);
}

#[test]
fn addi_sign_extends() {
    let mut ctx = TestContext::new(&[I::addi(1, 0, -2048), I::addi(2, 1, 2047)]);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(1), 0xFFFF_FFFF_FFFF_F800);
    assert_eq!(ctx.get_reg(2), u64::MAX);
}

#[test]
fn writes_to_x0_are_discarded() {
    let mut ctx = TestContext::new(&[I::addi(0, 0, 100), I::add(0, 1, 1), I::ld(0, 0, 0)]);
    ctx.set_reg(1, 9);
    ctx.sim.cpu.memory.write_u64(0, 0xAA);
    let snapshot = ctx.run();
    assert_eq!(snapshot.reg(0), 0);
}

#[test]
fn store_then_load_is_big_endian() {
    let mut ctx = TestContext::new(&[I::sd(1, 0, 8), I::ld(2, 0, 8)]);
    ctx.set_reg(1, 0x0102_0304_0506_0708);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(2), 0x0102_0304_0506_0708);
    assert_eq!(ctx.cpu().memory.read_u8(8), 0x01);
    assert_eq!(ctx.cpu().memory.read_u8(15), 0x08);
}

#[test]
fn negative_address_wraps_into_region() {
    // 0 + (-8) reduces to 1016 in a 1 KiB region.
    let mut ctx = TestContext::new(&[I::sd(1, 0, -8), I::ld(2, 0, 1016)]);
    ctx.set_reg(1, 0xCAFE);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(2), 0xCAFE);
}

#[test]
fn span_past_the_end_wraps_per_byte() {
    let mut ctx = TestContext::new(&[I::sd(1, 2, 0), I::ld(3, 2, 0), I::ld(4, 0, 0)]);
    ctx.set_reg(1, 0x1122_3344_5566_7788);
    ctx.set_reg(2, 1020);
    let _ = ctx.run();
    assert_eq!(ctx.get_reg(3), 0x1122_3344_5566_7788);
    assert_eq!(ctx.get_reg(4), 0x5566_7788_0000_0000);
}

#[test]
fn beq_taken_skips_and_not_taken_falls_through() {
    let mut ctx = TestContext::new(&[
        I::beq(1, 2, 8),     // taken: 0 == 0
        I::addi(3, 0, 1),    // skipped
        I::beq(1, 4, 8),     // not taken
        I::addi(5, 0, 1),    // executed
    ]);
    ctx.set_reg(4, 1);
    let snapshot = ctx.run();
    assert_eq!(snapshot.reg(3), 0);
    assert_eq!(snapshot.reg(5), 1);
    // beq, beq, addi, halt
    assert_eq!(snapshot.cycles, 4);
    assert_eq!(ctx.cpu().stats.branches_taken, 1);
}

#[test]
fn backward_branch_loops() {
    // x1 counts down from 3; the loop exits when it reaches 0.
    let mut ctx = TestContext::new(&[
        I::addi(1, 0, 3),
        I::beq(1, 0, 12),
        I::addi(1, 1, -1),
        I::beq(0, 0, -8),
    ]);
    let snapshot = ctx.run();
    assert_eq!(snapshot.reg(1), 0);
    // addi, 3 x (beq, addi, beq), beq, halt
    assert_eq!(snapshot.cycles, 1 + 9 + 1 + 1);
}

#[test]
fn halt_counts_as_a_cycle_and_is_terminal() {
    let mut ctx = TestContext::new(&[]);
    assert_eq!(ctx.step(), CpuState::Halted);
    assert_eq!(ctx.cycles(), 1);
    assert_eq!(ctx.step(), CpuState::Halted);
    assert_eq!(ctx.cycles(), 1, "stepping a halted CPU must not count");
    assert_eq!(ctx.cpu().pc, 0);
}

#[test]
fn step_reports_running_until_halt() {
    let mut ctx = TestContext::new(&[I::addi(1, 0, 1)]);
    assert_eq!(ctx.step(), CpuState::Running);
    assert_eq!(ctx.cpu().pc, 4);
    assert_eq!(ctx.step(), CpuState::Halted);
    assert!(ctx.cpu().is_halted());
}

#[test]
fn illegal_opcode_is_an_error() {
    let mut ctx = TestContext::from_words(&[0x0000_0013, 0x0000_006F]);
    assert_eq!(ctx.step(), CpuState::Running);
    assert_eq!(
        ctx.sim.tick(),
        Err(SimError::IllegalInstruction {
            pc: 4,
            word: 0x0000_006F
        })
    );
}

#[test]
fn branch_out_of_stream_is_an_error() {
    let mut ctx = TestContext::new(&[I::beq(0, 0, 64)]);
    assert_eq!(ctx.step(), CpuState::Running);
    assert_eq!(
        ctx.sim.tick(),
        Err(SimError::FetchOutOfBounds { pc: 64, len: 8 })
    );
}

#[test]
fn cycle_limit_stops_infinite_loop() {
    let mut config = Config::default();
    config.general.max_cycles = Some(10);
    // beq x0, x0, 0
    let mut sim = Simulator::from_words(&[0x0000_0063], &config).unwrap();
    assert_eq!(sim.run(), Err(SimError::CycleLimit { limit: 10, pc: 0 }));
    assert_eq!(sim.cpu.cycles(), 10);
}

#[test]
fn cycle_limit_equal_to_program_length_succeeds() {
    let mut config = Config::default();
    config.general.max_cycles = Some(3);
    let mut ctx = TestContext::with_config(&[I::addi(1, 0, 1), I::addi(2, 0, 2)], &config);
    let snapshot = ctx.run();
    assert_eq!(snapshot.cycles, 3);
}

#[test]
fn reset_restores_initial_state() {
    let mut ctx = TestContext::new(&[I::addi(1, 0, 5), I::sd(1, 0, 0)]);
    let _ = ctx.run();
    ctx.cpu_mut().reset();
    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.cpu().memory.read_u64(0), 0);
    assert_eq!(ctx.cycles(), 0);
    assert!(!ctx.cpu().is_halted());
}

#[test]
fn trace_flag_does_not_change_results() {
    let mut config = Config::default();
    config.general.trace_instructions = true;
    let program = [I::addi(1, 0, -1), I::sd(1, 0, 0), I::ld(2, 0, 0)];
    let traced = TestContext::with_config(&program, &config).run();
    let plain = TestContext::new(&program).run();
    assert_eq!(traced, plain);
}

#[test]
fn dump_state_shows_pc_and_registers() {
    let mut ctx = TestContext::new(&[I::addi(1, 0, -1)]);
    let _ = ctx.run();
    let dump = ctx.cpu().dump_state();
    assert!(dump.starts_with("PC = 0x0000000000000004 (Halted, 2 cycles)"));
    assert!(dump.contains("x1 =0xffffffffffffffff"));
}

proptest! {
    #[test]
    fn add_and_sub_are_modulo_2_64(a in any::<u64>(), b in any::<u64>()) {
        let mut ctx = TestContext::new(&[I::add(3, 1, 2), I::sub(4, 1, 2)]);
        ctx.set_reg(1, a);
        ctx.set_reg(2, b);
        let _ = ctx.run();
        let modulus = 1u128 << 64;
        let sum = (u128::from(a) + u128::from(b)) % modulus;
        let diff = (u128::from(a) + modulus - u128::from(b)) % modulus;
        prop_assert_eq!(u128::from(ctx.get_reg(3)), sum);
        prop_assert_eq!(u128::from(ctx.get_reg(4)), diff);
    }

    #[test]
    fn load_returns_what_store_wrote(
        base in any::<u64>(),
        offset in -2048i64..=2047,
        value in any::<u64>(),
    ) {
        let mut ctx = TestContext::new(&[I::sd(1, 2, offset), I::ld(3, 2, offset)]);
        ctx.set_reg(1, value);
        ctx.set_reg(2, base);
        let _ = ctx.run();
        prop_assert_eq!(ctx.get_reg(3), value);
        prop_assert_eq!(ctx.cpu().memory.read_u64(base.wrapping_add(offset as u64)), value);
    }

    #[test]
    fn beq_moves_pc_by_offset_or_four(
        nops in 0u64..8,
        half in -2048i64..=2047,
        a in any::<u64>(),
        equal in any::<bool>(),
    ) {
        let offset = half * 2;
        let mut program = vec![I::addi(0, 0, 0); nops as usize];
        program.push(I::beq(1, 2, offset));
        let mut ctx = TestContext::new(&program);
        ctx.set_reg(1, a);
        ctx.set_reg(2, if equal { a } else { !a });
        for _ in 0..=nops {
            prop_assert_eq!(ctx.step(), CpuState::Running);
        }
        let beq_pc = 4 * nops;
        let expected = if equal { beq_pc.wrapping_add(offset as u64) } else { beq_pc + 4 };
        prop_assert_eq!(ctx.cpu().pc, expected);
    }

    #[test]
    fn x0_reads_zero_after_any_program(
        program in prop::collection::vec(prop_oneof![instruction(), x0_writer()], 1..24),
        seeds in prop::collection::vec(any::<u64>(), 31),
    ) {
        let mut config = Config::default();
        config.general.max_cycles = Some(64);
        let mut ctx = TestContext::with_config(&program, &config);
        for (idx, &value) in seeds.iter().enumerate() {
            ctx.set_reg(idx + 1, value);
        }
        // Random branches may leave the stream or hit the cycle limit; x0 holds either way.
        while let Ok(CpuState::Running) = ctx.sim.tick() {
            prop_assert_eq!(ctx.sim.snapshot().reg(0), 0);
        }
        prop_assert_eq!(ctx.sim.snapshot().reg(0), 0);
    }
}
