/// # Quirks
/// Historical interpreters disagree on a handful of instructions. The defaults follow the
/// common convention; each flag opts into the alternative reading.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8xy6/8xyE shift Vy into Vx instead of shifting Vx in place
    pub shift_uses_vy: bool,
    /// Bnnn jumps to nnn + Vx (x being the top nibble of nnn) instead of nnn + V0
    pub jump_uses_vx: bool,
    /// Fx55/Fx65 leave I pointing past the last register transferred
    pub load_store_increments_i: bool,
}
