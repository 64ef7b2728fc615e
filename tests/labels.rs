use pretty_assertions::assert_eq;
use vasm::labels::layout;
use vasm::{assemble, compile, emit, resolve_labels, resolve_registers, AsmConfig, AsmError};

fn build(src: &str) -> Vec<u8> {
    assemble(src, &AsmConfig::default()).unwrap()
}

#[test]
fn forward_reference() {
    assert_eq!(
        build("JUMP lend\nNOPE\n:lend\nEXIT"),
        vec![0x10, 0, 4, 0x00, 0x01]
    );
}

#[test]
fn backward_reference() {
    assert_eq!(build(":lstart\nNOPE\nJUMP lstart"), vec![0x00, 0x10, 0, 0]);
}

#[test]
fn forward_and_backward_target_the_labelled_instruction() {
    let fwd = compile("JUMP l1\n:l1 EXIT").into_result().unwrap();
    let table = layout(&fwd).unwrap();
    assert_eq!(table.get("l1"), Some(3));
    assert_eq!(build("JUMP l1\n:l1 EXIT"), vec![0x10, 0, 3, 0x01]);

    let back = ":l1 EXIT\nNOPE\nJUMP l1";
    assert_eq!(build(back), vec![0x01, 0x00, 0x10, 0, 0]);
}

#[test]
fn unreferenced_label_order_does_not_matter() {
    let a = build("JUMP lx\n:la\n:lb\nNOPE\n:lx\nEXIT");
    let b = build("JUMP lx\n:lb\n:la\nNOPE\n:lx\nEXIT");
    assert_eq!(a, b);
    assert_eq!(a, vec![0x10, 0, 4, 0x00, 0x01]);
}

#[test]
fn redeclared_label_takes_last_offset() {
    assert_eq!(build(":la\nNOPE\n:la\nJUMP la"), vec![0x00, 0x10, 0, 1]);
}

#[test]
fn undeclared_label_fails_at_emit() {
    let mut program = compile("JUMP lnowhere").into_result().unwrap();
    resolve_registers(&mut program).unwrap();
    resolve_labels(&mut program).unwrap();
    match emit(&program) {
        Err(AsmError::Unresolved { name }) => assert_eq!(name, "lnowhere"),
        other => panic!("expected unresolved label, got {other:?}"),
    }
}

#[test]
fn program_may_fill_but_not_exceed_address_space() {
    let fits = "NOPE\n".repeat(0xFFFF);
    assert_eq!(build(&fits).len(), 0xFFFF);

    let mut program = compile(&"NOPE\n".repeat(0x10000)).into_result().unwrap();
    match resolve_labels(&mut program) {
        Err(AsmError::ProgramTooLarge { size }) => assert_eq!(size, 0x10000),
        other => panic!("expected layout error, got {other:?}"),
    }

    let tiles = "TILE 0 0 0 0 0 0 0 0 0\n".repeat(6554);
    let err = assemble(&tiles, &AsmConfig::default()).unwrap_err();
    assert!(matches!(err, AsmError::ProgramTooLarge { size: 65540 }));
}

#[test]
fn label_at_end_of_full_program() {
    let mut src = "NOPE\n".repeat(0xFFFC);
    src.push_str("JUMP lend\n:lend");
    let bin = build(&src);
    assert_eq!(&bin[0xFFFC..], &[0x10, 0xFF, 0xFF]);
}
