/// Occurrence count of every byte value in an input.
pub type FrequencyTable = [u64; 256];

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FrequencyTable {
    let mut freqs = [0_u64; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}

/// Number of distinct byte values present in a frequency table.
pub fn distinct(freqs: &FrequencyTable) -> usize {
    freqs.iter().filter(|&&f| f > 0).count()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn freqs_test() {
        let table = freqs(b"aaaabbbccd");
        assert_eq!(table[b'a' as usize], 4);
        assert_eq!(table[b'b' as usize], 3);
        assert_eq!(table[b'c' as usize], 2);
        assert_eq!(table[b'd' as usize], 1);
        assert_eq!(table.iter().sum::<u64>(), 10);
        assert_eq!(distinct(&table), 4);
    }

    #[test]
    fn empty_test() {
        let table = freqs(&[]);
        assert_eq!(distinct(&table), 0);
    }
}
