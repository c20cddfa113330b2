//! The static opcode table.
//!
//! One entry per known opcode: its mnemonic, the shape of its immediate and
//! the feature that gates it. Keys are the packed [`Opcode`] values.
use super::instruction::{ImmediateKind as K, Opcode};
use crate::features::Feature;
use phf::phf_ordered_map;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct OpcodeInfo {
    pub name: &'static str,
    pub immediate: K,
    pub feature: Option<Feature>,
}

const fn op(name: &'static str, immediate: K) -> OpcodeInfo {
    OpcodeInfo {
        name,
        immediate,
        feature: None,
    }
}

const fn gated(name: &'static str, immediate: K, feature: Feature) -> OpcodeInfo {
    OpcodeInfo {
        name,
        immediate,
        feature: Some(feature),
    }
}

pub(crate) fn lookup(opcode: Opcode) -> Option<&'static OpcodeInfo> {
    OPCODES.get(&opcode.key())
}

/// Iterates the table in definition order.
pub fn all() -> impl Iterator<Item = (Opcode, &'static OpcodeInfo)> {
    OPCODES.entries().map(|(&key, info)| {
        let opcode = match key >> 24 {
            0 => Opcode::new(key as u8),
            prefix => Opcode::prefixed(prefix as u8, key),
        };
        (opcode, info)
    })
}

static OPCODES: phf::OrderedMap<u32, OpcodeInfo> = phf_ordered_map! {
    // --- single-byte opcodes ---
    0x00u32 => op("unreachable", K::None),
    0x01u32 => op("nop", K::None),
    0x02u32 => op("block", K::BlockType),
    0x03u32 => op("loop", K::BlockType),
    0x04u32 => op("if", K::BlockType),
    0x05u32 => op("else", K::None),
    0x06u32 => gated("try", K::BlockType, Feature::Exceptions),
    0x07u32 => gated("catch", K::None, Feature::Exceptions),
    0x08u32 => gated("throw", K::Index, Feature::Exceptions),
    0x09u32 => gated("rethrow", K::None, Feature::Exceptions),
    0x0Au32 => gated("br_on_exn", K::BrOnExn, Feature::Exceptions),
    0x0Bu32 => op("end", K::None),
    0x0Cu32 => op("br", K::Index),
    0x0Du32 => op("br_if", K::Index),
    0x0Eu32 => op("br_table", K::BrTable),
    0x0Fu32 => op("return", K::None),
    0x10u32 => op("call", K::Index),
    0x11u32 => op("call_indirect", K::CallIndirect),
    0x12u32 => gated("return_call", K::Index, Feature::TailCall),
    0x13u32 => gated("return_call_indirect", K::CallIndirect, Feature::TailCall),
    0x1Au32 => op("drop", K::None),
    0x1Bu32 => op("select", K::None),
    0x1Cu32 => gated("select", K::ValueTypes, Feature::ReferenceTypes),
    0x20u32 => op("local.get", K::Index),
    0x21u32 => op("local.set", K::Index),
    0x22u32 => op("local.tee", K::Index),
    0x23u32 => op("global.get", K::Index),
    0x24u32 => op("global.set", K::Index),
    0x25u32 => gated("table.get", K::Index, Feature::ReferenceTypes),
    0x26u32 => gated("table.set", K::Index, Feature::ReferenceTypes),
    0x28u32 => op("i32.load", K::MemArg),
    0x29u32 => op("i64.load", K::MemArg),
    0x2Au32 => op("f32.load", K::MemArg),
    0x2Bu32 => op("f64.load", K::MemArg),
    0x2Cu32 => op("i32.load8_s", K::MemArg),
    0x2Du32 => op("i32.load8_u", K::MemArg),
    0x2Eu32 => op("i32.load16_s", K::MemArg),
    0x2Fu32 => op("i32.load16_u", K::MemArg),
    0x30u32 => op("i64.load8_s", K::MemArg),
    0x31u32 => op("i64.load8_u", K::MemArg),
    0x32u32 => op("i64.load16_s", K::MemArg),
    0x33u32 => op("i64.load16_u", K::MemArg),
    0x34u32 => op("i64.load32_s", K::MemArg),
    0x35u32 => op("i64.load32_u", K::MemArg),
    0x36u32 => op("i32.store", K::MemArg),
    0x37u32 => op("i64.store", K::MemArg),
    0x38u32 => op("f32.store", K::MemArg),
    0x39u32 => op("f64.store", K::MemArg),
    0x3Au32 => op("i32.store8", K::MemArg),
    0x3Bu32 => op("i32.store16", K::MemArg),
    0x3Cu32 => op("i64.store8", K::MemArg),
    0x3Du32 => op("i64.store16", K::MemArg),
    0x3Eu32 => op("i64.store32", K::MemArg),
    0x3Fu32 => op("memory.size", K::U8),
    0x40u32 => op("memory.grow", K::U8),
    0x41u32 => op("i32.const", K::S32),
    0x42u32 => op("i64.const", K::S64),
    0x43u32 => op("f32.const", K::F32),
    0x44u32 => op("f64.const", K::F64),
    0x45u32 => op("i32.eqz", K::None),
    0x46u32 => op("i32.eq", K::None),
    0x47u32 => op("i32.ne", K::None),
    0x48u32 => op("i32.lt_s", K::None),
    0x49u32 => op("i32.lt_u", K::None),
    0x4Au32 => op("i32.gt_s", K::None),
    0x4Bu32 => op("i32.gt_u", K::None),
    0x4Cu32 => op("i32.le_s", K::None),
    0x4Du32 => op("i32.le_u", K::None),
    0x4Eu32 => op("i32.ge_s", K::None),
    0x4Fu32 => op("i32.ge_u", K::None),
    0x50u32 => op("i64.eqz", K::None),
    0x51u32 => op("i64.eq", K::None),
    0x52u32 => op("i64.ne", K::None),
    0x53u32 => op("i64.lt_s", K::None),
    0x54u32 => op("i64.lt_u", K::None),
    0x55u32 => op("i64.gt_s", K::None),
    0x56u32 => op("i64.gt_u", K::None),
    0x57u32 => op("i64.le_s", K::None),
    0x58u32 => op("i64.le_u", K::None),
    0x59u32 => op("i64.ge_s", K::None),
    0x5Au32 => op("i64.ge_u", K::None),
    0x5Bu32 => op("f32.eq", K::None),
    0x5Cu32 => op("f32.ne", K::None),
    0x5Du32 => op("f32.lt", K::None),
    0x5Eu32 => op("f32.gt", K::None),
    0x5Fu32 => op("f32.le", K::None),
    0x60u32 => op("f32.ge", K::None),
    0x61u32 => op("f64.eq", K::None),
    0x62u32 => op("f64.ne", K::None),
    0x63u32 => op("f64.lt", K::None),
    0x64u32 => op("f64.gt", K::None),
    0x65u32 => op("f64.le", K::None),
    0x66u32 => op("f64.ge", K::None),
    0x67u32 => op("i32.clz", K::None),
    0x68u32 => op("i32.ctz", K::None),
    0x69u32 => op("i32.popcnt", K::None),
    0x6Au32 => op("i32.add", K::None),
    0x6Bu32 => op("i32.sub", K::None),
    0x6Cu32 => op("i32.mul", K::None),
    0x6Du32 => op("i32.div_s", K::None),
    0x6Eu32 => op("i32.div_u", K::None),
    0x6Fu32 => op("i32.rem_s", K::None),
    0x70u32 => op("i32.rem_u", K::None),
    0x71u32 => op("i32.and", K::None),
    0x72u32 => op("i32.or", K::None),
    0x73u32 => op("i32.xor", K::None),
    0x74u32 => op("i32.shl", K::None),
    0x75u32 => op("i32.shr_s", K::None),
    0x76u32 => op("i32.shr_u", K::None),
    0x77u32 => op("i32.rotl", K::None),
    0x78u32 => op("i32.rotr", K::None),
    0x79u32 => op("i64.clz", K::None),
    0x7Au32 => op("i64.ctz", K::None),
    0x7Bu32 => op("i64.popcnt", K::None),
    0x7Cu32 => op("i64.add", K::None),
    0x7Du32 => op("i64.sub", K::None),
    0x7Eu32 => op("i64.mul", K::None),
    0x7Fu32 => op("i64.div_s", K::None),
    0x80u32 => op("i64.div_u", K::None),
    0x81u32 => op("i64.rem_s", K::None),
    0x82u32 => op("i64.rem_u", K::None),
    0x83u32 => op("i64.and", K::None),
    0x84u32 => op("i64.or", K::None),
    0x85u32 => op("i64.xor", K::None),
    0x86u32 => op("i64.shl", K::None),
    0x87u32 => op("i64.shr_s", K::None),
    0x88u32 => op("i64.shr_u", K::None),
    0x89u32 => op("i64.rotl", K::None),
    0x8Au32 => op("i64.rotr", K::None),
    0x8Bu32 => op("f32.abs", K::None),
    0x8Cu32 => op("f32.neg", K::None),
    0x8Du32 => op("f32.ceil", K::None),
    0x8Eu32 => op("f32.floor", K::None),
    0x8Fu32 => op("f32.trunc", K::None),
    0x90u32 => op("f32.nearest", K::None),
    0x91u32 => op("f32.sqrt", K::None),
    0x92u32 => op("f32.add", K::None),
    0x93u32 => op("f32.sub", K::None),
    0x94u32 => op("f32.mul", K::None),
    0x95u32 => op("f32.div", K::None),
    0x96u32 => op("f32.min", K::None),
    0x97u32 => op("f32.max", K::None),
    0x98u32 => op("f32.copysign", K::None),
    0x99u32 => op("f64.abs", K::None),
    0x9Au32 => op("f64.neg", K::None),
    0x9Bu32 => op("f64.ceil", K::None),
    0x9Cu32 => op("f64.floor", K::None),
    0x9Du32 => op("f64.trunc", K::None),
    0x9Eu32 => op("f64.nearest", K::None),
    0x9Fu32 => op("f64.sqrt", K::None),
    0xA0u32 => op("f64.add", K::None),
    0xA1u32 => op("f64.sub", K::None),
    0xA2u32 => op("f64.mul", K::None),
    0xA3u32 => op("f64.div", K::None),
    0xA4u32 => op("f64.min", K::None),
    0xA5u32 => op("f64.max", K::None),
    0xA6u32 => op("f64.copysign", K::None),
    0xA7u32 => op("i32.wrap_i64", K::None),
    0xA8u32 => op("i32.trunc_f32_s", K::None),
    0xA9u32 => op("i32.trunc_f32_u", K::None),
    0xAAu32 => op("i32.trunc_f64_s", K::None),
    0xABu32 => op("i32.trunc_f64_u", K::None),
    0xACu32 => op("i64.extend_i32_s", K::None),
    0xADu32 => op("i64.extend_i32_u", K::None),
    0xAEu32 => op("i64.trunc_f32_s", K::None),
    0xAFu32 => op("i64.trunc_f32_u", K::None),
    0xB0u32 => op("i64.trunc_f64_s", K::None),
    0xB1u32 => op("i64.trunc_f64_u", K::None),
    0xB2u32 => op("f32.convert_i32_s", K::None),
    0xB3u32 => op("f32.convert_i32_u", K::None),
    0xB4u32 => op("f32.convert_i64_s", K::None),
    0xB5u32 => op("f32.convert_i64_u", K::None),
    0xB6u32 => op("f32.demote_f64", K::None),
    0xB7u32 => op("f64.convert_i32_s", K::None),
    0xB8u32 => op("f64.convert_i32_u", K::None),
    0xB9u32 => op("f64.convert_i64_s", K::None),
    0xBAu32 => op("f64.convert_i64_u", K::None),
    0xBBu32 => op("f64.promote_f32", K::None),
    0xBCu32 => op("i32.reinterpret_f32", K::None),
    0xBDu32 => op("i64.reinterpret_f64", K::None),
    0xBEu32 => op("f32.reinterpret_i32", K::None),
    0xBFu32 => op("f64.reinterpret_i64", K::None),
    0xC0u32 => gated("i32.extend8_s", K::None, Feature::SignExtension),
    0xC1u32 => gated("i32.extend16_s", K::None, Feature::SignExtension),
    0xC2u32 => gated("i64.extend8_s", K::None, Feature::SignExtension),
    0xC3u32 => gated("i64.extend16_s", K::None, Feature::SignExtension),
    0xC4u32 => gated("i64.extend32_s", K::None, Feature::SignExtension),
    0xD0u32 => gated("ref.null", K::ReferenceType, Feature::ReferenceTypes),
    0xD1u32 => gated("ref.is_null", K::None, Feature::ReferenceTypes),
    0xD2u32 => gated("ref.func", K::Index, Feature::ReferenceTypes),

    // --- 0xFC prefix: saturating truncation, bulk memory, tables ---
    0xFC000000u32 => gated("i32.trunc_sat_f32_s", K::None, Feature::SaturatingFloatToInt),
    0xFC000001u32 => gated("i32.trunc_sat_f32_u", K::None, Feature::SaturatingFloatToInt),
    0xFC000002u32 => gated("i32.trunc_sat_f64_s", K::None, Feature::SaturatingFloatToInt),
    0xFC000003u32 => gated("i32.trunc_sat_f64_u", K::None, Feature::SaturatingFloatToInt),
    0xFC000004u32 => gated("i64.trunc_sat_f32_s", K::None, Feature::SaturatingFloatToInt),
    0xFC000005u32 => gated("i64.trunc_sat_f32_u", K::None, Feature::SaturatingFloatToInt),
    0xFC000006u32 => gated("i64.trunc_sat_f64_s", K::None, Feature::SaturatingFloatToInt),
    0xFC000007u32 => gated("i64.trunc_sat_f64_u", K::None, Feature::SaturatingFloatToInt),
    0xFC000008u32 => gated("memory.init", K::Init, Feature::BulkMemory),
    0xFC000009u32 => gated("data.drop", K::Index, Feature::BulkMemory),
    0xFC00000Au32 => gated("memory.copy", K::Copy, Feature::BulkMemory),
    0xFC00000Bu32 => gated("memory.fill", K::U8, Feature::BulkMemory),
    0xFC00000Cu32 => gated("table.init", K::Init, Feature::BulkMemory),
    0xFC00000Du32 => gated("elem.drop", K::Index, Feature::BulkMemory),
    0xFC00000Eu32 => gated("table.copy", K::Copy, Feature::BulkMemory),
    0xFC00000Fu32 => gated("table.grow", K::Index, Feature::ReferenceTypes),
    0xFC000010u32 => gated("table.size", K::Index, Feature::ReferenceTypes),
    0xFC000011u32 => gated("table.fill", K::Index, Feature::ReferenceTypes),

    // --- 0xFD prefix: 128-bit SIMD ---
    0xFD000000u32 => gated("v128.load", K::MemArg, Feature::Simd),
    0xFD000001u32 => gated("v128.load8x8_s", K::MemArg, Feature::Simd),
    0xFD000002u32 => gated("v128.load8x8_u", K::MemArg, Feature::Simd),
    0xFD000003u32 => gated("v128.load16x4_s", K::MemArg, Feature::Simd),
    0xFD000004u32 => gated("v128.load16x4_u", K::MemArg, Feature::Simd),
    0xFD000005u32 => gated("v128.load32x2_s", K::MemArg, Feature::Simd),
    0xFD000006u32 => gated("v128.load32x2_u", K::MemArg, Feature::Simd),
    0xFD000007u32 => gated("v128.load8_splat", K::MemArg, Feature::Simd),
    0xFD000008u32 => gated("v128.load16_splat", K::MemArg, Feature::Simd),
    0xFD000009u32 => gated("v128.load32_splat", K::MemArg, Feature::Simd),
    0xFD00000Au32 => gated("v128.load64_splat", K::MemArg, Feature::Simd),
    0xFD00000Bu32 => gated("v128.store", K::MemArg, Feature::Simd),
    0xFD00000Cu32 => gated("v128.const", K::V128, Feature::Simd),
    0xFD00000Du32 => gated("i8x16.shuffle", K::Shuffle, Feature::Simd),
    0xFD00000Eu32 => gated("i8x16.swizzle", K::None, Feature::Simd),
    0xFD00000Fu32 => gated("i8x16.splat", K::None, Feature::Simd),
    0xFD000010u32 => gated("i16x8.splat", K::None, Feature::Simd),
    0xFD000011u32 => gated("i32x4.splat", K::None, Feature::Simd),
    0xFD000012u32 => gated("i64x2.splat", K::None, Feature::Simd),
    0xFD000013u32 => gated("f32x4.splat", K::None, Feature::Simd),
    0xFD000014u32 => gated("f64x2.splat", K::None, Feature::Simd),
    0xFD000015u32 => gated("i8x16.extract_lane_s", K::U8, Feature::Simd),
    0xFD000016u32 => gated("i8x16.extract_lane_u", K::U8, Feature::Simd),
    0xFD000017u32 => gated("i8x16.replace_lane", K::U8, Feature::Simd),
    0xFD000018u32 => gated("i16x8.extract_lane_s", K::U8, Feature::Simd),
    0xFD000019u32 => gated("i16x8.extract_lane_u", K::U8, Feature::Simd),
    0xFD00001Au32 => gated("i16x8.replace_lane", K::U8, Feature::Simd),
    0xFD00001Bu32 => gated("i32x4.extract_lane", K::U8, Feature::Simd),
    0xFD00001Cu32 => gated("i32x4.replace_lane", K::U8, Feature::Simd),
    0xFD00001Du32 => gated("i64x2.extract_lane", K::U8, Feature::Simd),
    0xFD00001Eu32 => gated("i64x2.replace_lane", K::U8, Feature::Simd),
    0xFD00001Fu32 => gated("f32x4.extract_lane", K::U8, Feature::Simd),
    0xFD000020u32 => gated("f32x4.replace_lane", K::U8, Feature::Simd),
    0xFD000021u32 => gated("f64x2.extract_lane", K::U8, Feature::Simd),
    0xFD000022u32 => gated("f64x2.replace_lane", K::U8, Feature::Simd),
    0xFD000023u32 => gated("i8x16.eq", K::None, Feature::Simd),
    0xFD000024u32 => gated("i8x16.ne", K::None, Feature::Simd),
    0xFD000025u32 => gated("i8x16.lt_s", K::None, Feature::Simd),
    0xFD000026u32 => gated("i8x16.lt_u", K::None, Feature::Simd),
    0xFD000027u32 => gated("i8x16.gt_s", K::None, Feature::Simd),
    0xFD000028u32 => gated("i8x16.gt_u", K::None, Feature::Simd),
    0xFD000029u32 => gated("i8x16.le_s", K::None, Feature::Simd),
    0xFD00002Au32 => gated("i8x16.le_u", K::None, Feature::Simd),
    0xFD00002Bu32 => gated("i8x16.ge_s", K::None, Feature::Simd),
    0xFD00002Cu32 => gated("i8x16.ge_u", K::None, Feature::Simd),
    0xFD00002Du32 => gated("i16x8.eq", K::None, Feature::Simd),
    0xFD00002Eu32 => gated("i16x8.ne", K::None, Feature::Simd),
    0xFD00002Fu32 => gated("i16x8.lt_s", K::None, Feature::Simd),
    0xFD000030u32 => gated("i16x8.lt_u", K::None, Feature::Simd),
    0xFD000031u32 => gated("i16x8.gt_s", K::None, Feature::Simd),
    0xFD000032u32 => gated("i16x8.gt_u", K::None, Feature::Simd),
    0xFD000033u32 => gated("i16x8.le_s", K::None, Feature::Simd),
    0xFD000034u32 => gated("i16x8.le_u", K::None, Feature::Simd),
    0xFD000035u32 => gated("i16x8.ge_s", K::None, Feature::Simd),
    0xFD000036u32 => gated("i16x8.ge_u", K::None, Feature::Simd),
    0xFD000037u32 => gated("i32x4.eq", K::None, Feature::Simd),
    0xFD000038u32 => gated("i32x4.ne", K::None, Feature::Simd),
    0xFD000039u32 => gated("i32x4.lt_s", K::None, Feature::Simd),
    0xFD00003Au32 => gated("i32x4.lt_u", K::None, Feature::Simd),
    0xFD00003Bu32 => gated("i32x4.gt_s", K::None, Feature::Simd),
    0xFD00003Cu32 => gated("i32x4.gt_u", K::None, Feature::Simd),
    0xFD00003Du32 => gated("i32x4.le_s", K::None, Feature::Simd),
    0xFD00003Eu32 => gated("i32x4.le_u", K::None, Feature::Simd),
    0xFD00003Fu32 => gated("i32x4.ge_s", K::None, Feature::Simd),
    0xFD000040u32 => gated("i32x4.ge_u", K::None, Feature::Simd),
    0xFD000041u32 => gated("f32x4.eq", K::None, Feature::Simd),
    0xFD000042u32 => gated("f32x4.ne", K::None, Feature::Simd),
    0xFD000043u32 => gated("f32x4.lt", K::None, Feature::Simd),
    0xFD000044u32 => gated("f32x4.gt", K::None, Feature::Simd),
    0xFD000045u32 => gated("f32x4.le", K::None, Feature::Simd),
    0xFD000046u32 => gated("f32x4.ge", K::None, Feature::Simd),
    0xFD000047u32 => gated("f64x2.eq", K::None, Feature::Simd),
    0xFD000048u32 => gated("f64x2.ne", K::None, Feature::Simd),
    0xFD000049u32 => gated("f64x2.lt", K::None, Feature::Simd),
    0xFD00004Au32 => gated("f64x2.gt", K::None, Feature::Simd),
    0xFD00004Bu32 => gated("f64x2.le", K::None, Feature::Simd),
    0xFD00004Cu32 => gated("f64x2.ge", K::None, Feature::Simd),
    0xFD00004Du32 => gated("v128.not", K::None, Feature::Simd),
    0xFD00004Eu32 => gated("v128.and", K::None, Feature::Simd),
    0xFD00004Fu32 => gated("v128.andnot", K::None, Feature::Simd),
    0xFD000050u32 => gated("v128.or", K::None, Feature::Simd),
    0xFD000051u32 => gated("v128.xor", K::None, Feature::Simd),
    0xFD000052u32 => gated("v128.bitselect", K::None, Feature::Simd),
    0xFD000053u32 => gated("v128.any_true", K::None, Feature::Simd),
    0xFD000054u32 => gated("v128.load8_lane", K::MemArgLane, Feature::Simd),
    0xFD000055u32 => gated("v128.load16_lane", K::MemArgLane, Feature::Simd),
    0xFD000056u32 => gated("v128.load32_lane", K::MemArgLane, Feature::Simd),
    0xFD000057u32 => gated("v128.load64_lane", K::MemArgLane, Feature::Simd),
    0xFD000058u32 => gated("v128.store8_lane", K::MemArgLane, Feature::Simd),
    0xFD000059u32 => gated("v128.store16_lane", K::MemArgLane, Feature::Simd),
    0xFD00005Au32 => gated("v128.store32_lane", K::MemArgLane, Feature::Simd),
    0xFD00005Bu32 => gated("v128.store64_lane", K::MemArgLane, Feature::Simd),
    0xFD00005Cu32 => gated("v128.load32_zero", K::MemArg, Feature::Simd),
    0xFD00005Du32 => gated("v128.load64_zero", K::MemArg, Feature::Simd),
    0xFD00005Eu32 => gated("f32x4.demote_f64x2_zero", K::None, Feature::Simd),
    0xFD00005Fu32 => gated("f64x2.promote_low_f32x4", K::None, Feature::Simd),
    0xFD000060u32 => gated("i8x16.abs", K::None, Feature::Simd),
    0xFD000061u32 => gated("i8x16.neg", K::None, Feature::Simd),
    0xFD000062u32 => gated("i8x16.popcnt", K::None, Feature::Simd),
    0xFD000063u32 => gated("i8x16.all_true", K::None, Feature::Simd),
    0xFD000064u32 => gated("i8x16.bitmask", K::None, Feature::Simd),
    0xFD000065u32 => gated("i8x16.narrow_i16x8_s", K::None, Feature::Simd),
    0xFD000066u32 => gated("i8x16.narrow_i16x8_u", K::None, Feature::Simd),
    0xFD000067u32 => gated("f32x4.ceil", K::None, Feature::Simd),
    0xFD000068u32 => gated("f32x4.floor", K::None, Feature::Simd),
    0xFD000069u32 => gated("f32x4.trunc", K::None, Feature::Simd),
    0xFD00006Au32 => gated("f32x4.nearest", K::None, Feature::Simd),
    0xFD00006Bu32 => gated("i8x16.shl", K::None, Feature::Simd),
    0xFD00006Cu32 => gated("i8x16.shr_s", K::None, Feature::Simd),
    0xFD00006Du32 => gated("i8x16.shr_u", K::None, Feature::Simd),
    0xFD00006Eu32 => gated("i8x16.add", K::None, Feature::Simd),
    0xFD00006Fu32 => gated("i8x16.add_sat_s", K::None, Feature::Simd),
    0xFD000070u32 => gated("i8x16.add_sat_u", K::None, Feature::Simd),
    0xFD000071u32 => gated("i8x16.sub", K::None, Feature::Simd),
    0xFD000072u32 => gated("i8x16.sub_sat_s", K::None, Feature::Simd),
    0xFD000073u32 => gated("i8x16.sub_sat_u", K::None, Feature::Simd),
    0xFD000074u32 => gated("f64x2.ceil", K::None, Feature::Simd),
    0xFD000075u32 => gated("f64x2.floor", K::None, Feature::Simd),
    0xFD000076u32 => gated("i8x16.min_s", K::None, Feature::Simd),
    0xFD000077u32 => gated("i8x16.min_u", K::None, Feature::Simd),
    0xFD000078u32 => gated("i8x16.max_s", K::None, Feature::Simd),
    0xFD000079u32 => gated("i8x16.max_u", K::None, Feature::Simd),
    0xFD00007Au32 => gated("f64x2.trunc", K::None, Feature::Simd),
    0xFD00007Bu32 => gated("i8x16.avgr_u", K::None, Feature::Simd),
    0xFD00007Cu32 => gated("i16x8.extadd_pairwise_i8x16_s", K::None, Feature::Simd),
    0xFD00007Du32 => gated("i16x8.extadd_pairwise_i8x16_u", K::None, Feature::Simd),
    0xFD00007Eu32 => gated("i32x4.extadd_pairwise_i16x8_s", K::None, Feature::Simd),
    0xFD00007Fu32 => gated("i32x4.extadd_pairwise_i16x8_u", K::None, Feature::Simd),
    0xFD000080u32 => gated("i16x8.abs", K::None, Feature::Simd),
    0xFD000081u32 => gated("i16x8.neg", K::None, Feature::Simd),
    0xFD000082u32 => gated("i16x8.q15mulr_sat_s", K::None, Feature::Simd),
    0xFD000083u32 => gated("i16x8.all_true", K::None, Feature::Simd),
    0xFD000084u32 => gated("i16x8.bitmask", K::None, Feature::Simd),
    0xFD000085u32 => gated("i16x8.narrow_i32x4_s", K::None, Feature::Simd),
    0xFD000086u32 => gated("i16x8.narrow_i32x4_u", K::None, Feature::Simd),
    0xFD000087u32 => gated("i16x8.extend_low_i8x16_s", K::None, Feature::Simd),
    0xFD000088u32 => gated("i16x8.extend_high_i8x16_s", K::None, Feature::Simd),
    0xFD000089u32 => gated("i16x8.extend_low_i8x16_u", K::None, Feature::Simd),
    0xFD00008Au32 => gated("i16x8.extend_high_i8x16_u", K::None, Feature::Simd),
    0xFD00008Bu32 => gated("i16x8.shl", K::None, Feature::Simd),
    0xFD00008Cu32 => gated("i16x8.shr_s", K::None, Feature::Simd),
    0xFD00008Du32 => gated("i16x8.shr_u", K::None, Feature::Simd),
    0xFD00008Eu32 => gated("i16x8.add", K::None, Feature::Simd),
    0xFD00008Fu32 => gated("i16x8.add_sat_s", K::None, Feature::Simd),
    0xFD000090u32 => gated("i16x8.add_sat_u", K::None, Feature::Simd),
    0xFD000091u32 => gated("i16x8.sub", K::None, Feature::Simd),
    0xFD000092u32 => gated("i16x8.sub_sat_s", K::None, Feature::Simd),
    0xFD000093u32 => gated("i16x8.sub_sat_u", K::None, Feature::Simd),
    0xFD000094u32 => gated("f64x2.nearest", K::None, Feature::Simd),
    0xFD000095u32 => gated("i16x8.mul", K::None, Feature::Simd),
    0xFD000096u32 => gated("i16x8.min_s", K::None, Feature::Simd),
    0xFD000097u32 => gated("i16x8.min_u", K::None, Feature::Simd),
    0xFD000098u32 => gated("i16x8.max_s", K::None, Feature::Simd),
    0xFD000099u32 => gated("i16x8.max_u", K::None, Feature::Simd),
    0xFD00009Bu32 => gated("i16x8.avgr_u", K::None, Feature::Simd),
    0xFD00009Cu32 => gated("i16x8.extmul_low_i8x16_s", K::None, Feature::Simd),
    0xFD00009Du32 => gated("i16x8.extmul_high_i8x16_s", K::None, Feature::Simd),
    0xFD00009Eu32 => gated("i16x8.extmul_low_i8x16_u", K::None, Feature::Simd),
    0xFD00009Fu32 => gated("i16x8.extmul_high_i8x16_u", K::None, Feature::Simd),
    0xFD0000A0u32 => gated("i32x4.abs", K::None, Feature::Simd),
    0xFD0000A1u32 => gated("i32x4.neg", K::None, Feature::Simd),
    0xFD0000A3u32 => gated("i32x4.all_true", K::None, Feature::Simd),
    0xFD0000A4u32 => gated("i32x4.bitmask", K::None, Feature::Simd),
    0xFD0000A7u32 => gated("i32x4.extend_low_i16x8_s", K::None, Feature::Simd),
    0xFD0000A8u32 => gated("i32x4.extend_high_i16x8_s", K::None, Feature::Simd),
    0xFD0000A9u32 => gated("i32x4.extend_low_i16x8_u", K::None, Feature::Simd),
    0xFD0000AAu32 => gated("i32x4.extend_high_i16x8_u", K::None, Feature::Simd),
    0xFD0000ABu32 => gated("i32x4.shl", K::None, Feature::Simd),
    0xFD0000ACu32 => gated("i32x4.shr_s", K::None, Feature::Simd),
    0xFD0000ADu32 => gated("i32x4.shr_u", K::None, Feature::Simd),
    0xFD0000AEu32 => gated("i32x4.add", K::None, Feature::Simd),
    0xFD0000B1u32 => gated("i32x4.sub", K::None, Feature::Simd),
    0xFD0000B5u32 => gated("i32x4.mul", K::None, Feature::Simd),
    0xFD0000B6u32 => gated("i32x4.min_s", K::None, Feature::Simd),
    0xFD0000B7u32 => gated("i32x4.min_u", K::None, Feature::Simd),
    0xFD0000B8u32 => gated("i32x4.max_s", K::None, Feature::Simd),
    0xFD0000B9u32 => gated("i32x4.max_u", K::None, Feature::Simd),
    0xFD0000BAu32 => gated("i32x4.dot_i16x8_s", K::None, Feature::Simd),
    0xFD0000BCu32 => gated("i32x4.extmul_low_i16x8_s", K::None, Feature::Simd),
    0xFD0000BDu32 => gated("i32x4.extmul_high_i16x8_s", K::None, Feature::Simd),
    0xFD0000BEu32 => gated("i32x4.extmul_low_i16x8_u", K::None, Feature::Simd),
    0xFD0000BFu32 => gated("i32x4.extmul_high_i16x8_u", K::None, Feature::Simd),
    0xFD0000C0u32 => gated("i64x2.abs", K::None, Feature::Simd),
    0xFD0000C1u32 => gated("i64x2.neg", K::None, Feature::Simd),
    0xFD0000C3u32 => gated("i64x2.all_true", K::None, Feature::Simd),
    0xFD0000C4u32 => gated("i64x2.bitmask", K::None, Feature::Simd),
    0xFD0000C7u32 => gated("i64x2.extend_low_i32x4_s", K::None, Feature::Simd),
    0xFD0000C8u32 => gated("i64x2.extend_high_i32x4_s", K::None, Feature::Simd),
    0xFD0000C9u32 => gated("i64x2.extend_low_i32x4_u", K::None, Feature::Simd),
    0xFD0000CAu32 => gated("i64x2.extend_high_i32x4_u", K::None, Feature::Simd),
    0xFD0000CBu32 => gated("i64x2.shl", K::None, Feature::Simd),
    0xFD0000CCu32 => gated("i64x2.shr_s", K::None, Feature::Simd),
    0xFD0000CDu32 => gated("i64x2.shr_u", K::None, Feature::Simd),
    0xFD0000CEu32 => gated("i64x2.add", K::None, Feature::Simd),
    0xFD0000D1u32 => gated("i64x2.sub", K::None, Feature::Simd),
    0xFD0000D5u32 => gated("i64x2.mul", K::None, Feature::Simd),
    0xFD0000D6u32 => gated("i64x2.eq", K::None, Feature::Simd),
    0xFD0000D7u32 => gated("i64x2.ne", K::None, Feature::Simd),
    0xFD0000D8u32 => gated("i64x2.lt_s", K::None, Feature::Simd),
    0xFD0000D9u32 => gated("i64x2.gt_s", K::None, Feature::Simd),
    0xFD0000DAu32 => gated("i64x2.le_s", K::None, Feature::Simd),
    0xFD0000DBu32 => gated("i64x2.ge_s", K::None, Feature::Simd),
    0xFD0000DCu32 => gated("i64x2.extmul_low_i32x4_s", K::None, Feature::Simd),
    0xFD0000DDu32 => gated("i64x2.extmul_high_i32x4_s", K::None, Feature::Simd),
    0xFD0000DEu32 => gated("i64x2.extmul_low_i32x4_u", K::None, Feature::Simd),
    0xFD0000DFu32 => gated("i64x2.extmul_high_i32x4_u", K::None, Feature::Simd),
    0xFD0000E0u32 => gated("f32x4.abs", K::None, Feature::Simd),
    0xFD0000E1u32 => gated("f32x4.neg", K::None, Feature::Simd),
    0xFD0000E3u32 => gated("f32x4.sqrt", K::None, Feature::Simd),
    0xFD0000E4u32 => gated("f32x4.add", K::None, Feature::Simd),
    0xFD0000E5u32 => gated("f32x4.sub", K::None, Feature::Simd),
    0xFD0000E6u32 => gated("f32x4.mul", K::None, Feature::Simd),
    0xFD0000E7u32 => gated("f32x4.div", K::None, Feature::Simd),
    0xFD0000E8u32 => gated("f32x4.min", K::None, Feature::Simd),
    0xFD0000E9u32 => gated("f32x4.max", K::None, Feature::Simd),
    0xFD0000EAu32 => gated("f32x4.pmin", K::None, Feature::Simd),
    0xFD0000EBu32 => gated("f32x4.pmax", K::None, Feature::Simd),
    0xFD0000ECu32 => gated("f64x2.abs", K::None, Feature::Simd),
    0xFD0000EDu32 => gated("f64x2.neg", K::None, Feature::Simd),
    0xFD0000EFu32 => gated("f64x2.sqrt", K::None, Feature::Simd),
    0xFD0000F0u32 => gated("f64x2.add", K::None, Feature::Simd),
    0xFD0000F1u32 => gated("f64x2.sub", K::None, Feature::Simd),
    0xFD0000F2u32 => gated("f64x2.mul", K::None, Feature::Simd),
    0xFD0000F3u32 => gated("f64x2.div", K::None, Feature::Simd),
    0xFD0000F4u32 => gated("f64x2.min", K::None, Feature::Simd),
    0xFD0000F5u32 => gated("f64x2.max", K::None, Feature::Simd),
    0xFD0000F6u32 => gated("f64x2.pmin", K::None, Feature::Simd),
    0xFD0000F7u32 => gated("f64x2.pmax", K::None, Feature::Simd),
    0xFD0000F8u32 => gated("i32x4.trunc_sat_f32x4_s", K::None, Feature::Simd),
    0xFD0000F9u32 => gated("i32x4.trunc_sat_f32x4_u", K::None, Feature::Simd),
    0xFD0000FAu32 => gated("f32x4.convert_i32x4_s", K::None, Feature::Simd),
    0xFD0000FBu32 => gated("f32x4.convert_i32x4_u", K::None, Feature::Simd),
    0xFD0000FCu32 => gated("i32x4.trunc_sat_f64x2_s_zero", K::None, Feature::Simd),
    0xFD0000FDu32 => gated("i32x4.trunc_sat_f64x2_u_zero", K::None, Feature::Simd),
    0xFD0000FEu32 => gated("f64x2.convert_low_i32x4_s", K::None, Feature::Simd),
    0xFD0000FFu32 => gated("f64x2.convert_low_i32x4_u", K::None, Feature::Simd),
};
