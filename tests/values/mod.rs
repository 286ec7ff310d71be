mod tests_values;
