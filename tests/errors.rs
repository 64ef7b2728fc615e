use pretty_assertions::assert_eq;
use vasm::program::Instruction;
use vasm::instructions::Opcode;
use vasm::{assemble, compile, labels, AsmConfig, AsmError, ParseError};

#[test]
fn bad_line_is_reported_and_good_line_kept() {
    let c = compile("EXIT\nJUMP notalabel");
    assert_eq!(c.errors.len(), 1);
    assert_eq!(c.errors[0].line, 1);
    assert_eq!(c.errors[0].reported_line(), 2);
    assert_eq!(c.errors[0].error, ParseError::NotALabel("notalabel".into()));
    assert_eq!(c.errors[0].to_string(), "> Line 2: 'notalabel' is not a label.");
    assert_eq!(c.program.instructions(), &[Instruction::Zero { op: Opcode::Exit }]);
}

#[test]
fn every_bad_line_is_collected_in_order() {
    let src = "FOO r1\nEXIT\nMOVE r1\n\nDTXT r1 hi\nTILE 64 0 0 0 0 0 0 0 0\nNOPE";
    let c = compile(src);
    let lines: Vec<usize> = c.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![0, 2, 4, 5]);
    assert_eq!(c.errors[0].error, ParseError::UnknownInstruction("FOO r1".into()));
    assert_eq!(
        c.errors[1].error,
        ParseError::OperandCount { mnemonic: "MOVE", expected: 2, found: 1 }
    );
    assert_eq!(c.errors[2].error, ParseError::NotAString("hi".into()));
    assert_eq!(c.errors[3].error, ParseError::TileIdOutOfRange("64".into()));
    assert_eq!(c.program.len(), 2);

    let err = c.into_result().unwrap_err();
    assert_eq!(err.lines().collect::<Vec<_>>(), vec![0, 2, 4, 5]);
    assert_eq!(err.to_string(), "4 compile error(s)");
}

#[test]
fn operand_syntax_errors() {
    let first_error = |src: &str| compile(src).errors.remove(0).error;
    assert_eq!(
        first_error("EXIT now"),
        ParseError::UnexpectedOperands { mnemonic: "EXIT", text: "now".into() }
    );
    assert_eq!(
        first_error("ADDI *rx"),
        ParseError::IndirectNotAllowed { mnemonic: "ADDI", operand: "*rx".into() }
    );
    assert_eq!(first_error("ADDI x"), ParseError::NotARegister("x".into()));
    assert_eq!(first_error("MOVE &rx ry"), ParseError::NotARegister("&rx".into()));
    assert_eq!(first_error("STOR 0xZZ r0"), ParseError::NotANumber("0xZZ".into()));
    assert_eq!(first_error("STOR &x r0"), ParseError::NotANumber("&x".into()));
    assert_eq!(first_error("TILE 1 &r0 0 0 0 0 0 0 0"), ParseError::NotANumber("&r0".into()));
    assert_eq!(first_error(":main"), ParseError::NotALabel("main".into()));
    assert_eq!(
        first_error("DTXT r0 \"ok\" extra"),
        ParseError::TrailingText("extra".into())
    );
    assert_eq!(
        first_error("DTXT r0 \"caf\u{e9}\""),
        ParseError::NotAscii("\"caf\u{e9}\"".into())
    );
    assert_eq!(
        first_error("DSEL"),
        ParseError::OperandCount { mnemonic: "DSEL", expected: 2, found: 0 }
    );
    assert_eq!(first_error("DSEL r0"), ParseError::NotAString("".into()));
    assert!(matches!(first_error("@macro"), ParseError::UnknownInstruction(_)));
}

#[test]
fn keep_going_assembles_what_parsed() {
    let src = "EXIT\nBOGUS\nNOPE";
    match assemble(src, &AsmConfig::default()) {
        Err(AsmError::Compile(e)) => assert_eq!(e.errors.len(), 1),
        other => panic!("expected compile error, got {other:?}"),
    }
    let cfg = AsmConfig { keep_going: true };
    assert_eq!(assemble(src, &cfg).unwrap(), vec![0x01, 0x00]);
}

#[test]
fn mnemonics_are_case_insensitive_labels_are_not() {
    assert_eq!(assemble("exit\nNoPe", &AsmConfig::default()).unwrap(), vec![0x01, 0x00]);
    assert_eq!(compile(":Lmain").errors.len(), 1);
    assert_eq!(compile("ADDI R0").errors.len(), 1);
}

#[test]
fn label_outlives_bad_text_after_it() {
    let c = compile(":lmain BOGUS");
    assert_eq!(labels(&c.program), vec!["lmain".to_string()]);
    assert_eq!(c.errors.len(), 1);
    assert_eq!(c.errors[0].line, 0);
    assert_eq!(c.errors[0].error, ParseError::UnknownInstruction("BOGUS".into()));

    let cfg = AsmConfig { keep_going: true };
    assert_eq!(
        assemble(":lmain BOGUS\nJUMP lmain", &cfg).unwrap(),
        vec![0x10, 0x00, 0x00]
    );
    assert_eq!(assemble(":la :lb\nJUMP la", &cfg).unwrap(), vec![0x10, 0x00, 0x00]);
}
