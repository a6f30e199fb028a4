/// Rounds up to the nearest multiple of a power of 2.
#[inline]
pub fn round_up_multiple_of_pow2(x: u32, power: u32) -> u32 {
    debug_assert!(power.is_power_of_two());

    (x + power - 1) & !(power - 1)
}

/// The least `r` such that `r * r >= x`.
pub fn ceil_sqrt(x: u64) -> u64 {
    let mut r = (x as f64).sqrt() as u64;
    // Float rounding may land one off in either direction.
    while r * r < x {
        r += 1;
    }
    while r > 0 && (r - 1) * (r - 1) >= x {
        r -= 1;
    }

    r
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_up_pow2() {
        assert_eq!(round_up_multiple_of_pow2(0, 16), 0);
        assert_eq!(round_up_multiple_of_pow2(1, 16), 16);
        assert_eq!(round_up_multiple_of_pow2(16, 16), 16);
        assert_eq!(round_up_multiple_of_pow2(17, 16), 32);

        assert_eq!(round_up_multiple_of_pow2(3, 4), 4);
        assert_eq!(round_up_multiple_of_pow2(4, 4), 4);
    }

    #[test]
    fn ceil_sqrt_brackets_input() {
        assert_eq!(ceil_sqrt(0), 0);
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(2), 2);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
        assert_eq!(ceil_sqrt(1 << 40), 1 << 20);
    }
}
