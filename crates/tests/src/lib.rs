

#[cfg(test)]
mod assessor_routing_tests;



#[cfg(test)]
mod smart_filtering_tests;
