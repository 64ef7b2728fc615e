use serde::{Deserialize, Serialize};

/// Opcode byte of every VASM instruction. The discriminants are the
/// on-disk encoding and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    Nope = 0x00,
    Exit = 0x01,
    Wkey = 0x02,
    Gkey = 0x03,
    Tick = 0x04,
    Save = 0x05,
    Load = 0x06,
    Tile = 0x07,
    Stor = 0x08,
    Move = 0x09,
    Addi = 0x0A,
    Subi = 0x0B,
    Muli = 0x0C,
    Divi = 0x0D,
    Modi = 0x0E,
    Invi = 0x0F,
    Jump = 0x10,
    Jpez = 0x11,
    Jpgz = 0x12,
    Jplz = 0x13,
    Call = 0x14,
    Retn = 0x15,
    Dtil = 0x16,
    Dnum = 0x17,
    Dtxt = 0x18,
    Dsel = 0x19,
    Rand = 0x1A,
}

/// Operand layout of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Shape {
    Zero,
    OneRegister,
    OneAddress,
    Two,
    Tile,
    Text,
    Selector,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OpDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
    pub shape: Shape,
    pub syntax: &'static str,
    pub summary: &'static str,
}

/// Indexed by opcode byte.
pub const TABLE: &[OpDesc] = &[
    OpDesc {
        op: Opcode::Nope,
        mnemonic: "NOPE",
        shape: Shape::Zero,
        syntax: "NOPE",
        summary: "Do nothing. Some runtimes use this as a debug instruction.",
    },
    OpDesc {
        op: Opcode::Exit,
        mnemonic: "EXIT",
        shape: Shape::Zero,
        syntax: "EXIT",
        summary: "Exit the program.",
    },
    OpDesc {
        op: Opcode::Wkey,
        mnemonic: "WKEY",
        shape: Shape::Zero,
        syntax: "WKEY",
        summary: "Wait for a key change; the key event is stored in r0.",
    },
    OpDesc {
        op: Opcode::Gkey,
        mnemonic: "GKEY",
        shape: Shape::Zero,
        syntax: "GKEY",
        summary: "Get the key event into r0.",
    },
    OpDesc {
        op: Opcode::Tick,
        mnemonic: "TICK",
        shape: Shape::Zero,
        syntax: "TICK",
        summary: "Store the clock tick in milliseconds into r0.",
    },
    OpDesc {
        op: Opcode::Save,
        mnemonic: "SAVE",
        shape: Shape::Zero,
        syntax: "SAVE",
        summary: "Save rs0..rs15 (16 bytes) to disk.",
    },
    OpDesc {
        op: Opcode::Load,
        mnemonic: "LOAD",
        shape: Shape::Zero,
        syntax: "LOAD",
        summary: "Load rs0..rs15 (16 bytes) from disk.",
    },
    OpDesc {
        op: Opcode::Tile,
        mnemonic: "TILE",
        shape: Shape::Tile,
        syntax: "TILE id d0 d1 d2 d3 d4 d5 d6 d7",
        summary: "Define the tile data; id in range [0, 63].",
    },
    OpDesc {
        op: Opcode::Stor,
        mnemonic: "STOR",
        shape: Shape::Two,
        syntax: "STOR num reg",
        summary: "Store the number (or &reg, the register's own index) into reg.",
    },
    OpDesc {
        op: Opcode::Move,
        mnemonic: "MOVE",
        shape: Shape::Two,
        syntax: "MOVE reg1 reg2",
        summary: "Copy the value of reg1 into reg2.",
    },
    OpDesc {
        op: Opcode::Addi,
        mnemonic: "ADDI",
        shape: Shape::OneRegister,
        syntax: "ADDI reg",
        summary: "r0 = r0 + reg",
    },
    OpDesc {
        op: Opcode::Subi,
        mnemonic: "SUBI",
        shape: Shape::OneRegister,
        syntax: "SUBI reg",
        summary: "r0 = r0 - reg",
    },
    OpDesc {
        op: Opcode::Muli,
        mnemonic: "MULI",
        shape: Shape::OneRegister,
        syntax: "MULI reg",
        summary: "r0 = r0 * reg",
    },
    OpDesc {
        op: Opcode::Divi,
        mnemonic: "DIVI",
        shape: Shape::OneRegister,
        syntax: "DIVI reg",
        summary: "r0 = r0 / reg",
    },
    OpDesc {
        op: Opcode::Modi,
        mnemonic: "MODI",
        shape: Shape::OneRegister,
        syntax: "MODI reg",
        summary: "r0 = r0 % reg",
    },
    OpDesc {
        op: Opcode::Invi,
        mnemonic: "INVI",
        shape: Shape::Zero,
        syntax: "INVI",
        summary: "r0 = ~r0",
    },
    OpDesc {
        op: Opcode::Jump,
        mnemonic: "JUMP",
        shape: Shape::OneAddress,
        syntax: "JUMP loc",
        summary: "Jump to loc.",
    },
    OpDesc {
        op: Opcode::Jpez,
        mnemonic: "JPEZ",
        shape: Shape::OneAddress,
        syntax: "JPEZ loc",
        summary: "Jump to loc if r0 == 0.",
    },
    OpDesc {
        op: Opcode::Jpgz,
        mnemonic: "JPGZ",
        shape: Shape::OneAddress,
        syntax: "JPGZ loc",
        summary: "Jump to loc if r0 > 0 and r0 < 128.",
    },
    OpDesc {
        op: Opcode::Jplz,
        mnemonic: "JPLZ",
        shape: Shape::OneAddress,
        syntax: "JPLZ loc",
        summary: "Jump to loc if r0 >= 128.",
    },
    OpDesc {
        op: Opcode::Call,
        mnemonic: "CALL",
        shape: Shape::OneAddress,
        syntax: "CALL loc",
        summary: "Push the return location and jump to loc.",
    },
    OpDesc {
        op: Opcode::Retn,
        mnemonic: "RETN",
        shape: Shape::Zero,
        syntax: "RETN",
        summary: "Return to the last CALL location.",
    },
    OpDesc {
        op: Opcode::Dtil,
        mnemonic: "DTIL",
        shape: Shape::Two,
        syntax: "DTIL reg1 reg2",
        summary: "Draw the tile with id reg2 at position reg1; both in [0, 63].",
    },
    OpDesc {
        op: Opcode::Dnum,
        mnemonic: "DNUM",
        shape: Shape::Two,
        syntax: "DNUM reg1 reg2",
        summary: "Draw the number in reg2 at position reg1 in [0, 63].",
    },
    OpDesc {
        op: Opcode::Dtxt,
        mnemonic: "DTXT",
        shape: Shape::Text,
        syntax: "DTXT reg \"text...\"",
        summary: "Draw ASCII text at position reg in [0, 63].",
    },
    OpDesc {
        op: Opcode::Dsel,
        mnemonic: "DSEL",
        shape: Shape::Selector,
        syntax: "DSEL reg \"option1\" \"option2\" ...",
        summary: "Draw a selector at the row of position reg and store the choice in r0.",
    },
    OpDesc {
        op: Opcode::Rand,
        mnemonic: "RAND",
        shape: Shape::Zero,
        syntax: "RAND",
        summary: "Generate a random number seeded by r0 into r0.",
    },
];

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        TABLE.get(byte as usize).map(|d| d.op)
    }

    pub fn desc(self) -> &'static OpDesc {
        &TABLE[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn shape(self) -> Shape {
        self.desc().shape
    }
}

/// Case-insensitive mnemonic lookup.
pub fn lookup(mnemonic: &str) -> Option<&'static OpDesc> {
    TABLE
        .iter()
        .find(|d| d.mnemonic.eq_ignore_ascii_case(mnemonic))
}
