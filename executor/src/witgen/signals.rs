/// Flattens a witness tree into a list of signal values.
///
/// Each witness lists its own signals first (outputs, then inputs, then
/// intermediates) followed by the signals of its sub-components in declaration
/// order, component arrays in index order.
pub trait Signals<T> {
    fn collect_signals(&self, out: &mut Vec<T>);

    fn to_signals(&self) -> Vec<T> {
        let mut out = vec![];
        self.collect_signals(&mut out);
        out
    }

    fn signal_count(&self) -> usize {
        self.to_signals().len()
    }
}

impl<T, S: Signals<T>> Signals<T> for [S] {
    fn collect_signals(&self, out: &mut Vec<T>) {
        for item in self {
            item.collect_signals(out);
        }
    }
}
