mod test_declarations;
