#![no_main]

use libfuzzer_sys::fuzz_target;
use xray86_core::Bitness;
use xray86_disasm::{Decoder, DecoderOptions, Disassembler, X86Disassembler, MAX_INSTRUCTION_LEN};

fuzz_target!(|data: &[u8]| {
    // The first byte picks the options so every escape-disable flag gets covered.
    let Some((&selector, code)) = data.split_first() else {
        return;
    };
    let options = DecoderOptions::from_bits_truncate(u32::from(selector));

    for bitness in [Bitness::Bits16, Bitness::Bits32, Bitness::Bits64] {
        let disasm = X86Disassembler::new(bitness, options);
        if let Ok(instr) = disasm.decode_instruction(code, 0x1000) {
            assert!(instr.len() >= 1 && instr.len() <= MAX_INSTRUCTION_LEN);
            assert!(instr.len() <= code.len());
        }

        let mut decoder = Decoder::with_ip(code, bitness, 0x1000, options);
        let mut count = 0;
        while decoder.can_decode() && count < 256 {
            let _ = decoder.decode();
            count += 1;
        }
    }
});
