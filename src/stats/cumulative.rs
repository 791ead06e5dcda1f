/// Running mean over every prefix of `values`.
///
/// Uses the incremental update `avg[i] = avg[i-1] + (v[i] - avg[i-1]) / (i+1)`
/// so the work stays linear and the drift stays bounded on long series.
pub fn cumulative_average(values: &[f64]) -> Vec<f64> {
    CumulativeAverage::new(values.iter().copied()).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().sum();
    Some(sum / values.len() as f64)
}

/// Iterator adapter yielding the cumulative moving average of its source.
pub struct CumulativeAverage<I> {
    source: I,
    current: f64,
    count: usize,
}

impl<I> CumulativeAverage<I>
where
    I: Iterator<Item = f64>,
{
    pub fn new(source: I) -> Self {
        Self {
            source,
            current: 0.0,
            count: 0,
        }
    }

    fn advance(&mut self, value: f64) -> f64 {
        self.count += 1;
        self.current = next_average(self.current, value, self.count);
        self.current
    }
}

impl<I> Iterator for CumulativeAverage<I>
where
    I: Iterator<Item = f64>,
{
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.source.next()?;
        Some(self.advance(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

fn next_average(previous: f64, value: f64, count: usize) -> f64 {
    if count == 1 {
        return value;
    }
    previous + (value - previous) / count as f64
}
