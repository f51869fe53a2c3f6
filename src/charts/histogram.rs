/// One equal-width histogram bin, `[start, end)` except the last which is closed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Split `values` into `bins` equal-width bins between their min and max.
///
/// Non-finite values are skipped. A single distinct value is centred in the
/// range `v - 0.5 ..= v + 0.5`. Zero bins is treated as one.
pub fn bin_values(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Vec::new();
    }
    let bins = bins.max(1);

    let (mut lo, mut hi) = finite
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = lo + width * i as f64;
            let end = if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            };
            Bin { start, end, count }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_cover_every_value() {
        let values = [2001.0, 2003.0, 2005.0, 2005.0, 2010.0, 2021.0];
        let bins = bin_values(&values, 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 2001.0);
        assert_eq!(bins[3].end, 2021.0);
        // 2001..2006 holds the first four values
        assert_eq!(bins[0].count, 4);
        // the max lands in the closed last bin
        assert_eq!(bins[3].count, 1);
    }

    #[test]
    fn test_equal_widths() {
        let bins = bin_values(&[0.0, 10.0], 5);
        assert!(bins.iter().all(|b| (b.width() - 2.0).abs() < 1e-9));
        assert_eq!(bins[2].midpoint(), 5.0);
    }

    #[test]
    fn test_single_value_is_centred() {
        let bins = bin_values(&[2012.0, 2012.0], 1);
        assert_eq!(
            bins,
            vec![Bin {
                start: 2011.5,
                end: 2012.5,
                count: 2
            }]
        );
    }

    #[test]
    fn test_empty_and_non_finite_input() {
        assert!(bin_values(&[], 10).is_empty());
        assert!(bin_values(&[f64::NAN], 10).is_empty());
    }

    #[test]
    fn test_zero_bins_means_one() {
        let bins = bin_values(&[1.0, 2.0, 3.0], 0);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }
}
