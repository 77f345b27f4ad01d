use special::Gamma;

/// Pearson Χ<sup>2</sup> (Chi-squared) goodness-of-fit test.
///
/// Returns the statistic and its p-value given the observed counts `f_obs`
/// and the probability `ps[i]` of landing in bin `i`.
///
/// # Panics
///
/// Panics if `f_obs` is empty or if `f_obs` and `ps` differ in length.
///
/// # Example
///
/// Test whether the prize doors were placed uniformly.
///
/// ```
/// use monty::misc::x2_test;
/// use monty::trial::TrialSet;
///
/// let trials = TrialSet::from_seed(3_000, 8);
/// let (prize, _pick) = trials.door_counts();
///
/// let (_stat, p) = x2_test(&prize, &[1.0 / 3.0; 3]);
/// assert!(p > 0.001);
/// ```
pub fn x2_test(f_obs: &[u64], ps: &[f64]) -> (f64, f64) {
    if f_obs.is_empty() {
        panic!("Empty container");
    }
    assert_eq!(
        f_obs.len(),
        ps.len(),
        "each observed count needs a bin probability"
    );

    let n: f64 = f_obs.iter().map(|&ct| ct as f64).sum();
    let x2 = f_obs
        .iter()
        .zip(ps.iter())
        .map(|(&o, &p)| {
            let expected = n * p;
            (o as f64 - expected).powi(2) / expected
        })
        .sum::<f64>();

    let df = (f_obs.len() - 1) as f64;
    let p = 1.0 - (x2 / 2.0).inc_gamma(df / 2.0);
    (x2, p)
}

/// Χ<sup>2</sup> test against equal probability for every bin
///
/// # Panics
///
/// Panics if `f_obs` is empty.
pub fn uniform_x2_test(f_obs: &[u64]) -> (f64, f64) {
    if f_obs.is_empty() {
        panic!("Empty container");
    }
    let ps = vec![1.0 / f_obs.len() as f64; f_obs.len()];
    x2_test(f_obs, &ps)
}
